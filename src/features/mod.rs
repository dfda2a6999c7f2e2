//! Deterministic URL feature extraction.
//!
//! `extract` turns a raw URL string into a fixed-width vector of 90 named
//! features, each normalized to {-1, 0, 1}. Polarity is a hard contract the
//! models were trained against: 1 = safe signal, -1 = suspicious signal,
//! 0 = neutral/unknown.
//!
//! Extraction never fails. A signal that cannot be computed degrades to 0,
//! and a URL that cannot be parsed at all produces the all-zero vector so
//! downstream models always get a fixed-shape input.

pub mod lexical;
pub mod lists;
pub mod net;

use std::collections::{HashMap, HashSet};

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use url::Url;

use self::lexical::{max_consecutive_run, shannon_entropy};
use self::lists::{
    BRAND_NAMES, COMMON_TLDS, FINANCIAL_WORDS, MULTI_PART_SUFFIXES, SUSPICIOUS_KEYWORDS,
    SUSPICIOUS_TLDS, TRUSTED_DOMAINS, TRUSTED_TLDS, URGENT_WORDS, URL_SHORTENERS,
};
use self::net::{NetProbe, OfflineProbe, SystemProbe};

/// Number of features in the canonical vector.
pub const FEATURE_COUNT: usize = 90;

/// Canonical feature names, in the exact order the models were trained with.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "URL_Length",
    "Domain_Length",
    "Path_Length",
    "Has_HTTPS",
    "Has_Protocol",
    "Num_Dots",
    "Num_Hyphens",
    "Num_Underscores",
    "Num_Slashes",
    "Num_At",
    "Num_Ampersand",
    "Num_Percent",
    "Num_Subdomains",
    "Subdomain_Length",
    "Has_WWW",
    "Query_Length",
    "Fragment_Length",
    "Num_Query_Params",
    "Directory_Depth",
    "File_Extension_Length",
    "Has_Index_Page",
    "Has_IP",
    "Has_Port",
    "Is_IP_Only",
    "Has_Double_Slash",
    "Has_At_Symbol",
    "Has_Tilde",
    "Percent_Encoding_Count",
    "Unicode_Char_Count",
    "Has_Hex_Encoding",
    "TLD_Length",
    "TLD_Type",
    "Is_Common_TLD",
    "Is_Trusted_Domain",
    "Is_Shortening_Service",
    "Domain_Age",
    "Has_Brand_Name",
    "Has_Typosquatting",
    "Brand_Distance",
    "Domain_Token_Count",
    "Longest_Domain_Token",
    "Shortest_Domain_Token",
    "Has_Prefix_Suffix",
    "Digit_Domain_Ratio",
    "Consecutive_Consonants",
    "Has_Valid_SSL",
    "SSL_Validity_Period",
    "Has_Trusted_CA",
    "SSL_Days_To_Expire",
    "Forces_HTTPS",
    "Has_HSTS",
    "Has_Security_Headers",
    "Certificate_Transparency",
    "Has_Mixed_Content",
    "SSL_Version",
    "Has_DNS_Record",
    "Is_Suspicious_IP_Range",
    "DNS_Resolve_Time",
    "Has_DNSSEC",
    "Num_Nameservers",
    "Has_Forms",
    "Has_Password_Field",
    "External_Links_Ratio",
    "Has_IFrame",
    "Has_Popup",
    "Content_Length",
    "Favicon_From_Domain",
    "Has_Copyright",
    "Has_Social_Links",
    "Page_Rank",
    "Digit_Ratio",
    "Letter_Ratio",
    "Special_Char_Ratio",
    "Uppercase_Ratio",
    "Lowercase_Ratio",
    "Mixed_Case",
    "Vowel_Ratio",
    "Consonant_Ratio",
    "Max_Consecutive_Chars",
    "Char_Repetition_Rate",
    "URL_Entropy",
    "Domain_Entropy",
    "Path_Entropy",
    "Suspicious_Keyword_Count",
    "Has_Urgent_Words",
    "Has_Financial_Words",
    "Random_String_Score",
    "Has_Dictionary_Words",
    "Obfuscation_Score",
    "URL_Complexity_Score",
];

static FEATURE_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    FEATURE_NAMES
        .iter()
        .enumerate()
        .map(|(i, &name)| (name, i))
        .collect()
});

static IP_IN_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").unwrap());
static IP_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").unwrap());
static PERCENT_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").unwrap());
static HEX_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\x[0-9A-Fa-f]{2}").unwrap());
static PREFIX_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-.*\.").unwrap());
static CONSONANT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[bcdfghjklmnpqrstvwxyz]+").unwrap());
static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.-]").unwrap());

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Three-way length classifier: below `short` → 1, below `long` → 0, else -1.
pub fn normalize_length(value: usize, short: usize, long: usize) -> i8 {
    if value < short {
        1
    } else if value < long {
        0
    } else {
        -1
    }
}

/// Three-way count classifier with inclusive boundaries:
/// ≤ `low` → 1, ≤ `high` → 0, else -1.
pub fn normalize_count(value: usize, low: usize, high: usize) -> i8 {
    if value <= low {
        1
    } else if value <= high {
        0
    } else {
        -1
    }
}

/// Ratio classifier over [0, 1]: < 0.3 → 1, < 0.6 → 0, else -1.
pub fn normalize_ratio(ratio: f64) -> i8 {
    if ratio < 0.3 {
        1
    } else if ratio < 0.6 {
        0
    } else {
        -1
    }
}

/// Entropy classifier: < 3.5 → 1, < 4.5 → 0, else -1.
pub fn normalize_entropy(entropy: f64) -> i8 {
    if entropy < 3.5 {
        1
    } else if entropy < 4.5 {
        0
    } else {
        -1
    }
}

// =============================================================================
// FEATURE VECTOR
// =============================================================================

/// Ordered, fixed-width feature vector in canonical name order.
///
/// Created fresh per prediction and not mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [i8; FEATURE_COUNT],
}

impl FeatureVector {
    /// All-neutral vector; also the total-failure fallback.
    pub fn zeroed() -> Self {
        Self {
            values: [0; FEATURE_COUNT],
        }
    }

    fn set(&mut self, name: &str, value: i8) {
        debug_assert!((-1..=1).contains(&value), "{} out of domain: {}", name, value);
        match FEATURE_INDEX.get(name) {
            Some(&idx) => self.values[idx] = value,
            None => debug_assert!(false, "unknown feature name: {}", name),
        }
    }

    /// Look up a feature by canonical name.
    pub fn get(&self, name: &str) -> Option<i8> {
        FEATURE_INDEX.get(name).map(|&idx| self.values[idx])
    }

    /// Values in canonical order.
    pub fn values(&self) -> &[i8] {
        &self.values
    }

    /// Values widened to f32 for model input.
    pub fn raw_row(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }

    /// Iterate (name, value) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i8)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    /// True when extraction fell back to the all-zero vector.
    ///
    /// Any URL that parses sets several ±1-valued features (e.g. `Num_At`,
    /// `Has_WWW`), so all-zero only arises from total parse failure.
    pub fn is_degraded(&self) -> bool {
        self.values.iter().all(|&v| v == 0)
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// URL → `FeatureVector`, with pluggable network probing.
pub struct FeatureExtractor {
    probe: Box<dyn NetProbe>,
}

impl FeatureExtractor {
    /// Extractor with live SSL/DNS probes.
    pub fn new() -> Self {
        Self {
            probe: Box::new(SystemProbe::new()),
        }
    }

    /// Extractor that skips the network; SSL/DNS features carry their
    /// unknown/unsafe defaults.
    pub fn offline() -> Self {
        Self {
            probe: Box::new(OfflineProbe),
        }
    }

    pub fn with_probe(probe: Box<dyn NetProbe>) -> Self {
        Self { probe }
    }

    /// Extract the canonical feature vector. Never fails: an unparseable URL
    /// yields the all-zero vector.
    pub fn extract(&self, url: &str) -> FeatureVector {
        match parse_url(url) {
            Some(parts) => self.extract_parts(&parts),
            None => {
                warn!("unparseable URL, degrading to zero vector: {:?}", url);
                FeatureVector::zeroed()
            }
        }
    }

    fn extract_parts(&self, parts: &UrlParts) -> FeatureVector {
        let mut fv = FeatureVector::zeroed();
        let url = parts.raw.as_str();
        let url_lower = url.to_lowercase();
        let netloc_lower = parts.netloc.to_lowercase();
        let domain_lower = parts.domain_label.to_lowercase();
        let stats = CharStats::of(url);
        let len = stats.len.max(1) as f64;
        let count = |c: char| url.matches(c).count();

        // ===== URL shape =====

        fv.set("URL_Length", normalize_length(stats.len, 54, 75));
        fv.set(
            "Domain_Length",
            normalize_length(parts.netloc.chars().count(), 20, 30),
        );
        fv.set(
            "Path_Length",
            normalize_length(parts.path.chars().count(), 30, 60),
        );

        fv.set(
            "Has_HTTPS",
            match parts.scheme.as_str() {
                "https" => 1,
                "http" => -1,
                _ => 0,
            },
        );
        fv.set(
            "Has_Protocol",
            if matches!(parts.scheme.as_str(), "http" | "https") {
                1
            } else {
                -1
            },
        );

        fv.set("Num_Dots", normalize_count(count('.'), 3, 5));
        fv.set("Num_Hyphens", normalize_count(count('-'), 0, 2));
        fv.set("Num_Underscores", normalize_count(count('_'), 0, 1));
        fv.set("Num_Slashes", normalize_count(count('/'), 3, 5));
        fv.set("Num_At", if count('@') == 0 { 1 } else { -1 });
        fv.set("Num_Ampersand", normalize_count(count('&'), 0, 3));
        fv.set("Num_Percent", normalize_count(count('%'), 0, 2));

        let subdomain_count = if parts.subdomain.is_empty() {
            0
        } else {
            parts.subdomain.split('.').count()
        };
        fv.set("Num_Subdomains", normalize_count(subdomain_count, 1, 2));
        fv.set(
            "Subdomain_Length",
            normalize_length(parts.subdomain.chars().count(), 10, 20),
        );
        fv.set("Has_WWW", if parts.subdomain.starts_with("www") { 1 } else { -1 });

        fv.set(
            "Query_Length",
            normalize_length(parts.query.chars().count(), 20, 50),
        );
        fv.set(
            "Fragment_Length",
            normalize_length(parts.fragment.chars().count(), 10, 30),
        );
        let param_count = query_param_count(&parts.query);
        fv.set("Num_Query_Params", normalize_count(param_count, 0, 3));

        let dir_depth = parts.path.split('/').filter(|s| !s.is_empty()).count();
        fv.set("Directory_Depth", normalize_count(dir_depth, 2, 4));
        let ext_len = if parts.path.contains('.') {
            parts
                .path
                .rsplit('.')
                .next()
                .map(|ext| ext.chars().count())
                .unwrap_or(0)
        } else {
            0
        };
        fv.set("File_Extension_Length", normalize_count(ext_len, 0, 4));
        fv.set(
            "Has_Index_Page",
            if parts.path.to_lowercase().contains("index") {
                1
            } else {
                -1
            },
        );

        fv.set("Has_IP", if IP_IN_HOST.is_match(&parts.netloc) { -1 } else { 1 });
        fv.set(
            "Has_Port",
            match parts.port {
                Some(p) if p != 80 && p != 443 => -1,
                _ => 1,
            },
        );
        fv.set("Is_IP_Only", if IP_ONLY.is_match(&parts.netloc) { -1 } else { 1 });

        fv.set("Has_Double_Slash", if parts.path.contains("//") { -1 } else { 1 });
        fv.set("Has_At_Symbol", if url.contains('@') { -1 } else { 1 });
        fv.set("Has_Tilde", if url.contains('~') { -1 } else { 1 });

        let percent_count = PERCENT_ESCAPE.find_iter(url).count();
        let unicode_count = stats.non_ascii;
        fv.set("Percent_Encoding_Count", normalize_count(percent_count, 0, 3));
        fv.set("Unicode_Char_Count", normalize_count(unicode_count, 0, 2));
        fv.set("Has_Hex_Encoding", if HEX_ESCAPE.is_match(url) { -1 } else { 1 });

        // ===== Domain reputation and structure =====

        fv.set(
            "TLD_Length",
            normalize_length(parts.suffix.chars().count(), 3, 5),
        );
        let dotted_tld = format!(".{}", parts.suffix);
        fv.set(
            "TLD_Type",
            if TRUSTED_TLDS.contains(&dotted_tld.as_str()) {
                1
            } else if SUSPICIOUS_TLDS.contains(&dotted_tld.as_str()) {
                -1
            } else {
                0
            },
        );
        fv.set(
            "Is_Common_TLD",
            if COMMON_TLDS.contains(&parts.suffix.as_str()) {
                1
            } else {
                -1
            },
        );

        let is_trusted = TRUSTED_DOMAINS.iter().any(|&t| netloc_lower.contains(t));
        fv.set("Is_Trusted_Domain", if is_trusted { 1 } else { -1 });
        fv.set(
            "Is_Shortening_Service",
            if URL_SHORTENERS.iter().any(|&s| netloc_lower.contains(s)) {
                -1
            } else {
                1
            },
        );
        // Registration age is not probed; trusted domains get the benefit of
        // the doubt, everything else stays neutral.
        fv.set("Domain_Age", if is_trusted { 1 } else { 0 });

        let has_brand = BRAND_NAMES.iter().any(|&b| domain_lower.contains(b));
        fv.set(
            "Has_Brand_Name",
            if has_brand && is_trusted {
                1
            } else if has_brand {
                -1
            } else {
                0
            },
        );
        fv.set(
            "Has_Typosquatting",
            if has_brand && !is_trusted { -1 } else { 1 },
        );
        // Brand_Distance stays 0.

        let tokens: Vec<&str> = TOKEN_SPLIT.split(&parts.domain_label).collect();
        fv.set("Domain_Token_Count", normalize_count(tokens.len(), 1, 3));
        let longest = tokens.iter().map(|t| t.chars().count()).max().unwrap_or(0);
        fv.set("Longest_Domain_Token", normalize_length(longest, 10, 15));
        let shortest = tokens
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| t.chars().count())
            .min()
            .unwrap_or(999);
        fv.set("Shortest_Domain_Token", if shortest >= 3 { 1 } else { -1 });

        fv.set(
            "Has_Prefix_Suffix",
            if PREFIX_SUFFIX.is_match(&parts.netloc) { -1 } else { 1 },
        );
        let domain_len = parts.domain_label.chars().count();
        let digit_domain_ratio = parts
            .domain_label
            .chars()
            .filter(|c| c.is_numeric())
            .count() as f64
            / domain_len.max(1) as f64;
        fv.set("Digit_Domain_Ratio", normalize_ratio(digit_domain_ratio));
        let consonant_run = CONSONANT_RUN
            .find_iter(&domain_lower)
            .map(|m| m.as_str().chars().count())
            .max()
            .unwrap_or(0);
        fv.set("Consecutive_Consonants", normalize_count(consonant_run, 4, 6));

        // ===== SSL (best effort) =====

        let ssl = self.probe.ssl_check(&parts.host);
        fv.set("Has_Valid_SSL", ssl.has_ssl);
        let validity = if ssl.days_to_expire > 180 {
            1
        } else if ssl.days_to_expire > 30 {
            0
        } else {
            -1
        };
        fv.set("SSL_Validity_Period", validity);
        fv.set("Has_Trusted_CA", if ssl.trusted_issuer { 1 } else { -1 });
        fv.set("SSL_Days_To_Expire", validity);
        fv.set("Forces_HTTPS", if parts.scheme == "https" { 1 } else { -1 });
        // Has_HSTS, Has_Security_Headers, Certificate_Transparency,
        // Has_Mixed_Content and SSL_Version stay 0: no header probing.

        // ===== DNS (best effort) =====

        let dns = self.probe.dns_check(&parts.host);
        fv.set("Has_DNS_Record", dns.has_dns);
        fv.set(
            "Is_Suspicious_IP_Range",
            if dns.private_ip { -1 } else { 1 },
        );
        // DNS_Resolve_Time, Has_DNSSEC, Num_Nameservers stay 0.

        // Content features (Has_Forms .. Page_Rank) stay 0: no page crawling.

        // ===== Lexical ratios =====

        fv.set("Digit_Ratio", normalize_ratio(stats.digits as f64 / len));
        let letter_ratio = stats.letters as f64 / len;
        fv.set("Letter_Ratio", if letter_ratio > 0.7 { 1 } else { 0 });
        fv.set(
            "Special_Char_Ratio",
            normalize_ratio((stats.len - stats.alnum) as f64 / len),
        );
        let upper_ratio = stats.upper as f64 / len;
        fv.set(
            "Uppercase_Ratio",
            normalize_count((upper_ratio * 10.0) as usize, 0, 3),
        );
        fv.set("Lowercase_Ratio", if letter_ratio > 0.7 { 1 } else { 0 });
        fv.set(
            "Mixed_Case",
            if upper_ratio > 0.0 && letter_ratio > 0.0 { -1 } else { 1 },
        );
        let vowel_ratio = stats.vowels as f64 / len;
        fv.set("Vowel_Ratio", if vowel_ratio > 0.3 { 1 } else { 0 });
        fv.set("Consonant_Ratio", if vowel_ratio < 0.5 { 1 } else { 0 });
        fv.set(
            "Max_Consecutive_Chars",
            normalize_count(max_consecutive_run(&parts.netloc), 2, 3),
        );
        let diversity = stats.unique as f64 / len;
        fv.set("Char_Repetition_Rate", if diversity > 0.6 { 1 } else { 0 });

        // ===== Heuristics =====

        fv.set("URL_Entropy", normalize_entropy(shannon_entropy(url)));
        fv.set("Domain_Entropy", normalize_entropy(shannon_entropy(&parts.netloc)));
        fv.set("Path_Entropy", normalize_entropy(shannon_entropy(&parts.path)));

        let keyword_count = SUSPICIOUS_KEYWORDS
            .iter()
            .filter(|&&kw| url_lower.contains(kw))
            .count();
        fv.set("Suspicious_Keyword_Count", normalize_count(keyword_count, 0, 1));
        fv.set(
            "Has_Urgent_Words",
            if URGENT_WORDS.iter().any(|&w| url_lower.contains(w)) {
                -1
            } else {
                1
            },
        );
        fv.set(
            "Has_Financial_Words",
            if FINANCIAL_WORDS.iter().any(|&w| url_lower.contains(w)) {
                -1
            } else {
                1
            },
        );

        let random_score = if domain_len > 0 {
            shannon_entropy(&parts.domain_label) / (domain_len as f64).log2().max(1.0)
        } else {
            0.0
        };
        fv.set("Random_String_Score", normalize_ratio(random_score));
        // Has_Dictionary_Words stays 0.

        fv.set(
            "Obfuscation_Score",
            normalize_ratio((percent_count + unicode_count) as f64 / len),
        );

        let complexity = ((subdomain_count + dir_depth + param_count) as f64 / 3.0) as usize;
        fv.set("URL_Complexity_Score", normalize_count(complexity, 1, 3));

        fv
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// URL DECOMPOSITION
// =============================================================================

#[derive(Debug)]
struct UrlParts {
    /// Trimmed input as given; whole-URL counts and ratios run over this.
    raw: String,
    /// Lowercase scheme, or empty when the input carried none.
    scheme: String,
    /// host[:port] authority component; empty when the input has no
    /// authority, scheme-less input included.
    netloc: String,
    host: String,
    port: Option<u16>,
    path: String,
    query: String,
    fragment: String,
    subdomain: String,
    /// Registrable label, e.g. `google` in `www.google.com`.
    domain_label: String,
    /// Public suffix, e.g. `com` or `co.uk`.
    suffix: String,
}

fn parse_url(raw: &str) -> Option<UrlParts> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = Url::parse(trimmed) {
        let host = parsed.host_str().unwrap_or("").to_string();
        let port = parsed.port();
        let netloc = if host.is_empty() {
            String::new()
        } else {
            match port {
                Some(p) => format!("{}:{}", host, p),
                None => host.clone(),
            }
        };
        let (subdomain, domain_label, suffix) = split_registrable(&host);

        return Some(UrlParts {
            raw: trimmed.to_string(),
            scheme: parsed.scheme().to_lowercase(),
            netloc,
            host,
            port,
            path: parsed.path().to_string(),
            query: parsed.query().unwrap_or("").to_string(),
            fragment: parsed.fragment().unwrap_or("").to_string(),
            subdomain,
            domain_label,
            suffix,
        });
    }

    // Scheme-less input has no authority: the whole text stays in the path
    // and the length/depth features read it there. The registrable split
    // still sees the leading host-like segment, stripped of userinfo/port.
    let (rest, fragment) = match trimmed.split_once('#') {
        Some((rest, fragment)) => (rest, fragment),
        None => (trimmed, ""),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    };
    let head = path.split('/').next().unwrap_or("");
    let head = head.rsplit('@').next().unwrap_or("");
    let head = head.split(':').next().unwrap_or("");
    let (subdomain, domain_label, suffix) = split_registrable(head);

    Some(UrlParts {
        raw: trimmed.to_string(),
        scheme: String::new(),
        netloc: String::new(),
        host: String::new(),
        port: None,
        path: path.to_string(),
        query: query.to_string(),
        fragment: fragment.to_string(),
        subdomain,
        domain_label,
        suffix,
    })
}

/// Split a hostname into (subdomain, registrable label, public suffix).
///
/// Handles the common two-label suffixes from `MULTI_PART_SUFFIXES`; IP
/// literals and single-label hosts have no suffix.
fn split_registrable(host: &str) -> (String, String, String) {
    if IP_ONLY.is_match(host) {
        return (String::new(), host.to_string(), String::new());
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return (String::new(), host.to_string(), String::new());
    }

    let last_two = labels[labels.len() - 2..].join(".").to_lowercase();
    let suffix_labels = if labels.len() > 2 && MULTI_PART_SUFFIXES.contains(&last_two.as_str()) {
        2
    } else {
        1
    };
    let suffix = labels[labels.len() - suffix_labels..].join(".").to_lowercase();
    let domain_label = labels[labels.len() - 1 - suffix_labels].to_string();
    let subdomain = labels[..labels.len() - 1 - suffix_labels].join(".");

    (subdomain, domain_label, suffix)
}

/// Count distinct query keys that carry a non-empty value.
fn query_param_count(query: &str) -> usize {
    let mut keys = HashSet::new();
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            if !value.is_empty() {
                keys.insert(key);
            }
        }
    }
    keys.len()
}

/// Single-pass character statistics over the raw URL.
struct CharStats {
    len: usize,
    digits: usize,
    letters: usize,
    alnum: usize,
    upper: usize,
    vowels: usize,
    non_ascii: usize,
    unique: usize,
}

impl CharStats {
    fn of(text: &str) -> Self {
        let mut stats = Self {
            len: 0,
            digits: 0,
            letters: 0,
            alnum: 0,
            upper: 0,
            vowels: 0,
            non_ascii: 0,
            unique: 0,
        };
        let mut seen = HashSet::new();
        for c in text.chars() {
            stats.len += 1;
            if c.is_numeric() {
                stats.digits += 1;
            }
            if c.is_alphabetic() {
                stats.letters += 1;
            }
            if c.is_alphanumeric() {
                stats.alnum += 1;
            }
            if c.is_uppercase() {
                stats.upper += 1;
            }
            if matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u') {
                stats.vowels += 1;
            }
            if !c.is_ascii() {
                stats.non_ascii += 1;
            }
            seen.insert(c);
        }
        stats.unique = seen.len();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::net::{DnsInfo, SslInfo};

    struct StubProbe {
        ssl: SslInfo,
        dns: DnsInfo,
    }

    impl NetProbe for StubProbe {
        fn ssl_check(&self, _host: &str) -> SslInfo {
            self.ssl
        }

        fn dns_check(&self, _host: &str) -> DnsInfo {
            self.dns
        }
    }

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::offline()
    }

    #[test]
    fn test_normalize_length_boundaries() {
        assert_eq!(normalize_length(53, 54, 75), 1);
        assert_eq!(normalize_length(54, 54, 75), 0);
        assert_eq!(normalize_length(74, 54, 75), 0);
        assert_eq!(normalize_length(75, 54, 75), -1);
    }

    #[test]
    fn test_normalize_count_boundaries() {
        assert_eq!(normalize_count(3, 3, 5), 1);
        assert_eq!(normalize_count(4, 3, 5), 0);
        assert_eq!(normalize_count(5, 3, 5), 0);
        assert_eq!(normalize_count(6, 3, 5), -1);
    }

    #[test]
    fn test_normalize_ratio_boundaries() {
        assert_eq!(normalize_ratio(0.29), 1);
        assert_eq!(normalize_ratio(0.3), 0);
        assert_eq!(normalize_ratio(0.59), 0);
        assert_eq!(normalize_ratio(0.6), -1);
    }

    #[test]
    fn test_normalize_entropy_boundaries() {
        assert_eq!(normalize_entropy(3.49), 1);
        assert_eq!(normalize_entropy(3.5), 0);
        assert_eq!(normalize_entropy(4.49), 0);
        assert_eq!(normalize_entropy(4.5), -1);
    }

    #[test]
    fn test_canonical_feature_list() {
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_NAMES[0], "URL_Length");
        assert_eq!(FEATURE_NAMES[FEATURE_COUNT - 1], "URL_Complexity_Score");
        let unique: HashSet<&str> = FEATURE_NAMES.iter().copied().collect();
        assert_eq!(unique.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_vector_always_in_domain() {
        let long_url = format!("https://example.com/{}", "a".repeat(500));
        let inputs = [
            "",
            "http://",
            "not a url at all",
            "https://www.google.com",
            "https://пример.рф/страница",
            "ftp://files.example.org/pub",
            "data:text/html,hello",
            long_url.as_str(),
        ];
        let extractor = extractor();
        for input in inputs {
            let fv = extractor.extract(input);
            assert_eq!(fv.iter().count(), FEATURE_COUNT, "input: {:?}", input);
            for (name, value) in fv.iter() {
                assert!(
                    (-1..=1).contains(&value),
                    "feature {} out of domain for {:?}: {}",
                    name,
                    input,
                    value
                );
            }
        }
    }

    #[test]
    fn test_empty_string_degrades_to_zero_vector() {
        let fv = extractor().extract("");
        assert!(fv.is_degraded());
        assert!(fv.values().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = extractor();
        let url = "https://login-secure.example.tk/verify?account=1";
        assert_eq!(extractor.extract(url), extractor.extract(url));
    }

    #[test]
    fn test_trusted_https_url() {
        let fv = extractor().extract("https://www.google.com");
        assert_eq!(fv.get("Has_HTTPS"), Some(1));
        assert_eq!(fv.get("Has_Protocol"), Some(1));
        assert_eq!(fv.get("Has_WWW"), Some(1));
        assert_eq!(fv.get("Is_Trusted_Domain"), Some(1));
        assert_eq!(fv.get("Domain_Age"), Some(1));
        assert_eq!(fv.get("Has_Brand_Name"), Some(1));
        assert_eq!(fv.get("Has_Typosquatting"), Some(1));
        assert_eq!(fv.get("TLD_Type"), Some(1));
        assert_eq!(fv.get("Is_Common_TLD"), Some(1));
        assert_eq!(fv.get("Num_At"), Some(1));
        assert_eq!(fv.get("Is_IP_Only"), Some(1));
        assert_eq!(fv.get("URL_Length"), Some(1));
        assert_eq!(fv.get("Forces_HTTPS"), Some(1));
        // Offline probe: network signals degrade to the unsafe defaults.
        assert_eq!(fv.get("Has_Valid_SSL"), Some(-1));
        assert_eq!(fv.get("Has_DNS_Record"), Some(-1));
        assert!(!fv.is_degraded());
    }

    #[test]
    fn test_ip_literal_phishing_url() {
        let fv = extractor().extract("http://192.168.13.17/secure-login-update?verify=1&account=2");
        assert_eq!(fv.get("Has_HTTPS"), Some(-1));
        assert_eq!(fv.get("Has_IP"), Some(-1));
        assert_eq!(fv.get("Is_IP_Only"), Some(-1));
        assert_eq!(fv.get("Is_Trusted_Domain"), Some(-1));
        assert_eq!(fv.get("Forces_HTTPS"), Some(-1));
        // login, secure, update, verify, account → well past the count band
        assert_eq!(fv.get("Suspicious_Keyword_Count"), Some(-1));
    }

    #[test]
    fn test_scheme_less_input() {
        let fv = extractor().extract("www.google.com");
        assert_eq!(fv.get("Has_HTTPS"), Some(0));
        assert_eq!(fv.get("Has_Protocol"), Some(-1));
        assert_eq!(fv.get("Has_WWW"), Some(1));
        // No authority without a scheme, so netloc-based reputation reads
        // empty and stays on the suspicious side.
        assert_eq!(fv.get("Is_Trusted_Domain"), Some(-1));
        assert!(!fv.is_degraded());
    }

    #[test]
    fn test_scheme_less_input_stays_in_path() {
        let parts = parse_url("example.com/a/b/file.html?x=1#frag").unwrap();
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.host, "");
        assert_eq!(parts.path, "example.com/a/b/file.html");
        assert_eq!(parts.query, "x=1");
        assert_eq!(parts.fragment, "frag");
        // The registrable split still reads the leading segment
        assert_eq!(parts.domain_label, "example");
        assert_eq!(parts.suffix, "com");

        // With a scheme the same input keeps its authority
        let parts = parse_url("http://example.com/a/b/file.html").unwrap();
        assert_eq!(parts.netloc, "example.com");
        assert_eq!(parts.path, "/a/b/file.html");
    }

    #[test]
    fn test_shortener_and_suspicious_tld() {
        let fv = extractor().extract("https://bit.ly/3xYz");
        assert_eq!(fv.get("Is_Shortening_Service"), Some(-1));

        let fv = extractor().extract("http://example.tk");
        assert_eq!(fv.get("TLD_Type"), Some(-1));
        assert_eq!(fv.get("Is_Common_TLD"), Some(-1));
    }

    #[test]
    fn test_ssl_dns_signals_flow_through_probe() {
        let extractor = FeatureExtractor::with_probe(Box::new(StubProbe {
            ssl: SslInfo {
                has_ssl: 1,
                days_to_expire: 365,
                trusted_issuer: true,
            },
            dns: DnsInfo {
                has_dns: 1,
                private_ip: false,
            },
        }));
        let fv = extractor.extract("https://example.com");
        assert_eq!(fv.get("Has_Valid_SSL"), Some(1));
        assert_eq!(fv.get("SSL_Validity_Period"), Some(1));
        assert_eq!(fv.get("SSL_Days_To_Expire"), Some(1));
        assert_eq!(fv.get("Has_Trusted_CA"), Some(1));
        assert_eq!(fv.get("Has_DNS_Record"), Some(1));
        assert_eq!(fv.get("Is_Suspicious_IP_Range"), Some(1));
    }

    #[test]
    fn test_private_ip_resolution_is_suspicious() {
        let extractor = FeatureExtractor::with_probe(Box::new(StubProbe {
            ssl: SslInfo::unknown(),
            dns: DnsInfo {
                has_dns: 1,
                private_ip: true,
            },
        }));
        let fv = extractor.extract("http://intranet.example.com");
        assert_eq!(fv.get("Has_DNS_Record"), Some(1));
        assert_eq!(fv.get("Is_Suspicious_IP_Range"), Some(-1));
    }

    #[test]
    fn test_stub_features_stay_zero() {
        let fv = extractor().extract("https://www.google.com");
        for name in [
            "Has_Forms",
            "Has_Password_Field",
            "Page_Rank",
            "Has_DNSSEC",
            "Num_Nameservers",
            "Brand_Distance",
            "Has_Dictionary_Words",
            "SSL_Version",
            "Certificate_Transparency",
        ] {
            assert_eq!(fv.get(name), Some(0), "stub feature {} must stay 0", name);
        }
    }

    #[test]
    fn test_split_registrable() {
        assert_eq!(
            split_registrable("www.example.com"),
            ("www".into(), "example".into(), "com".into())
        );
        assert_eq!(
            split_registrable("a.b.example.co.uk"),
            ("a.b".into(), "example".into(), "co.uk".into())
        );
        assert_eq!(
            split_registrable("localhost"),
            ("".into(), "localhost".into(), "".into())
        );
        assert_eq!(
            split_registrable("10.0.0.1"),
            ("".into(), "10.0.0.1".into(), "".into())
        );
    }

    #[test]
    fn test_query_param_count() {
        assert_eq!(query_param_count(""), 0);
        assert_eq!(query_param_count("a=1&b=2"), 2);
        // Repeated keys count once; blank values are dropped
        assert_eq!(query_param_count("a=1&a=2&b="), 1);
        assert_eq!(query_param_count("flag"), 0);
    }

    #[test]
    fn test_serializes_in_canonical_order() {
        let fv = extractor().extract("https://www.google.com");
        let json = serde_json::to_string(&fv).unwrap();
        assert!(json.starts_with("{\"URL_Length\":"));
        let url_pos = json.find("URL_Entropy").unwrap();
        let complexity_pos = json.find("URL_Complexity_Score").unwrap();
        assert!(url_pos < complexity_pos);
    }
}
