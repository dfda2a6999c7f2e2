//! Fixed reference tables used by the feature extractor.
//!
//! These are process-wide immutable configuration data. The pretrained
//! models were fitted against features computed from exactly these lists,
//! so editing them invalidates the model weights.

/// Keywords frequently found in phishing URLs (substring match, lowercase).
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login",
    "signin",
    "account",
    "update",
    "verify",
    "secure",
    "banking",
    "confirm",
    "suspend",
    "locked",
    "alert",
    "warning",
    "urgent",
    "expire",
    "password",
    "credential",
    "validate",
    "authenticate",
    "wallet",
    "payment",
    "billing",
    "invoice",
    "refund",
    "prize",
    "winner",
    "claim",
    "free",
    "gift",
    "bonus",
    "rewards",
    "click",
    "now",
    "limited",
    "offer",
];

/// Known URL shortening services (hostname substring match).
pub const URL_SHORTENERS: &[&str] = &[
    "bit.ly",
    "goo.gl",
    "tinyurl.com",
    "ow.ly",
    "t.co",
    "is.gd",
    "buff.ly",
    "adf.ly",
    "bit.do",
    "short.io",
    "tiny.cc",
    "rebrand.ly",
    "cutt.ly",
    "bl.ink",
    "shorte.st",
    "clk.sh",
];

/// High-reputation domains treated as a safe signal.
pub const TRUSTED_DOMAINS: &[&str] = &[
    "google.com",
    "youtube.com",
    "facebook.com",
    "wikipedia.org",
    "amazon.com",
    "twitter.com",
    "instagram.com",
    "linkedin.com",
    "microsoft.com",
    "apple.com",
    "netflix.com",
    "reddit.com",
    "yahoo.com",
    "ebay.com",
    "github.com",
    "stackoverflow.com",
    "wordpress.com",
    "adobe.com",
    "paypal.com",
    "live.com",
];

/// TLDs with a high abuse rate.
pub const SUSPICIOUS_TLDS: &[&str] = &[
    ".tk", ".ml", ".ga", ".cf", ".gq", ".pw", ".cc", ".xyz", ".top", ".work",
    ".click", ".link", ".download", ".racing", ".review",
];

/// Long-established TLDs.
pub const TRUSTED_TLDS: &[&str] = &[".com", ".org", ".net", ".edu", ".gov", ".mil"];

/// TLDs considered common enough to be a weak safe signal on their own.
pub const COMMON_TLDS: &[&str] = &["com", "org", "net"];

/// Brand names frequently impersonated by phishing domains.
pub const BRAND_NAMES: &[&str] = &[
    "google",
    "facebook",
    "amazon",
    "microsoft",
    "apple",
    "paypal",
    "netflix",
    "ebay",
    "twitter",
    "instagram",
    "linkedin",
    "yahoo",
    "alibaba",
    "samsung",
    "oracle",
    "walmart",
    "visa",
    "mastercard",
    "wells",
    "chase",
    "bank",
    "citibank",
    "hsbc",
    "barclays",
];

/// Urgency wording used by scare-tactic URLs.
pub const URGENT_WORDS: &[&str] = &["urgent", "immediate", "now", "alert"];

/// Financial wording used by credential-harvesting URLs.
pub const FINANCIAL_WORDS: &[&str] = &["bank", "paypal", "payment", "credit"];

/// Certificate authorities whose issuer string counts as a trusted CA signal.
pub const TRUSTED_CA_NAMES: &[&str] =
    &["verisign", "digicert", "comodo", "godaddy", "letsencrypt", "let's encrypt"];

/// Multi-label public suffixes the registrable-domain splitter knows about.
///
/// Not a full public-suffix list; covers the common two-label suffixes so
/// that hosts like `example.co.uk` split into (`example`, `co.uk`) rather
/// than (`co`, `uk`).
pub const MULTI_PART_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "me.uk", "co.jp", "ne.jp", "or.jp",
    "com.au", "net.au", "org.au", "com.br", "com.cn", "com.mx", "com.tr",
    "co.in", "co.nz", "co.za", "co.kr", "com.sg", "com.hk", "com.tw",
];
