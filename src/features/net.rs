//! Best-effort SSL/DNS probes with safe fallback values.
//!
//! Network signals are lower-fidelity than the lexical features: every probe
//! is bounded by a short timeout, and any failure (refused connection, DNS
//! servfail, bad certificate, timeout) degrades to the unknown/unsafe default
//! instead of propagating into the extraction loop.

use std::net::{IpAddr, SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::Resolver;
use x509_parser::prelude::*;

use crate::features::lists::TRUSTED_CA_NAMES;

/// Upper bound for each individual network operation.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Outcome of a TLS certificate probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SslInfo {
    /// 1 = verified handshake succeeded, -1 = unknown/failed.
    pub has_ssl: i8,
    /// Days until the certificate expires; -1 when unknown.
    pub days_to_expire: i64,
    /// Whether the issuer matched a well-known CA name.
    pub trusted_issuer: bool,
}

impl SslInfo {
    /// The fallback value used when the probe cannot complete.
    pub fn unknown() -> Self {
        Self {
            has_ssl: -1,
            days_to_expire: -1,
            trusted_issuer: false,
        }
    }
}

/// Outcome of a DNS resolution probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DnsInfo {
    /// 1 = the host resolved, -1 = unknown/failed.
    pub has_dns: i8,
    /// Whether the first resolved address is private or loopback.
    pub private_ip: bool,
}

impl DnsInfo {
    /// The fallback value used when the probe cannot complete.
    pub fn unknown() -> Self {
        Self {
            has_dns: -1,
            private_ip: false,
        }
    }
}

/// Capability for the network-backed feature signals.
///
/// Implementations must never panic or block past their timeout; they return
/// the `unknown()` defaults on any failure.
pub trait NetProbe: Send + Sync {
    fn ssl_check(&self, host: &str) -> SslInfo;
    fn dns_check(&self, host: &str) -> DnsInfo;
}

/// Probe that performs real TLS handshakes and DNS lookups.
///
/// All hostname resolution goes through a per-thread resolver configured
/// with `PROBE_TIMEOUT`, never the OS resolver and its retry schedule, so
/// batch probes stay parallel and no single lookup can outlive its deadline.
pub struct SystemProbe {
    tls_config: Arc<rustls::ClientConfig>,
    timeout: Duration,
}

impl SystemProbe {
    pub fn new() -> Self {
        let mut roots = rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let tls_config = Arc::new(
            rustls::ClientConfig::builder()
                .with_root_certificates(roots)
                .with_no_client_auth(),
        );

        Self {
            tls_config,
            timeout: PROBE_TIMEOUT,
        }
    }

    fn try_handshake(&self, host: &str) -> Result<SslInfo, Box<dyn std::error::Error>> {
        let server_name = rustls::pki_types::ServerName::try_from(host.to_string())?;
        let ip = resolve_host(host).ok_or("host did not resolve")?;
        let addr = SocketAddr::new(ip, 443);

        let mut sock = TcpStream::connect_timeout(&addr, self.timeout)?;
        sock.set_read_timeout(Some(self.timeout))?;
        sock.set_write_timeout(Some(self.timeout))?;

        let mut conn = rustls::ClientConnection::new(self.tls_config.clone(), server_name)?;
        while conn.is_handshaking() {
            conn.complete_io(&mut sock)?;
        }

        let cert_der = conn
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or("no peer certificate")?;
        let (_, cert) =
            parse_x509_certificate(cert_der.as_ref()).map_err(|e| e.to_string())?;

        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
        let days_to_expire = (cert.validity().not_after.timestamp() - now) / 86_400;

        let issuer = cert.issuer().to_string().to_lowercase();
        let trusted_issuer = TRUSTED_CA_NAMES.iter().any(|ca| issuer.contains(ca));

        Ok(SslInfo {
            has_ssl: 1,
            days_to_expire,
            trusted_issuer,
        })
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl NetProbe for SystemProbe {
    fn ssl_check(&self, host: &str) -> SslInfo {
        if host.is_empty() {
            return SslInfo::unknown();
        }
        match self.try_handshake(host) {
            Ok(info) => info,
            Err(e) => {
                debug!("SSL probe failed for {}: {}", host, e);
                SslInfo::unknown()
            }
        }
    }

    fn dns_check(&self, host: &str) -> DnsInfo {
        if host.is_empty() {
            return DnsInfo::unknown();
        }
        let lookup = match with_resolver(|resolver| resolver.lookup_ip(host)) {
            Some(lookup) => lookup,
            None => return DnsInfo::unknown(),
        };
        match lookup {
            Ok(response) => match response.iter().next() {
                Some(ip) => DnsInfo {
                    has_dns: 1,
                    private_ip: is_private_ip(ip),
                },
                None => DnsInfo::unknown(),
            },
            Err(e) => {
                debug!("DNS probe failed for {}: {}", host, e);
                DnsInfo::unknown()
            }
        }
    }
}

/// Probe that skips the network entirely and always reports unknown.
///
/// Used for offline operation and in tests; the SSL/DNS features then carry
/// their unsafe defaults.
pub struct OfflineProbe;

impl NetProbe for OfflineProbe {
    fn ssl_check(&self, _host: &str) -> SslInfo {
        SslInfo::unknown()
    }

    fn dns_check(&self, _host: &str) -> DnsInfo {
        DnsInfo::unknown()
    }
}

/// Run `f` against this thread's resolver, building it on first use.
///
/// One resolver per thread keeps batch lookups parallel; every lookup is
/// bounded by `PROBE_TIMEOUT` with a single attempt.
fn with_resolver<T>(f: impl FnOnce(&Resolver) -> T) -> Option<T> {
    thread_local! {
        static RESOLVER: once_cell::unsync::Lazy<Option<Resolver>> =
            once_cell::unsync::Lazy::new(build_resolver);
    }
    RESOLVER.with(|resolver| resolver.as_ref().map(f))
}

fn build_resolver() -> Option<Resolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = PROBE_TIMEOUT;
    opts.attempts = 1;
    match Resolver::new(ResolverConfig::default(), opts) {
        Ok(resolver) => Some(resolver),
        Err(e) => {
            debug!("DNS resolver unavailable: {}", e);
            None
        }
    }
}

/// Resolve a host to one address within the probe timeout. IP literals
/// short-circuit the resolver entirely.
fn resolve_host(host: &str) -> Option<IpAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Some(ip);
    }
    match with_resolver(|resolver| resolver.lookup_ip(host))? {
        Ok(response) => response.iter().next(),
        Err(e) => {
            debug!("address resolution failed for {}: {}", host, e);
            None
        }
    }
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => v6.is_loopback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssl_unknown_defaults() {
        let info = SslInfo::unknown();
        assert_eq!(info.has_ssl, -1);
        assert_eq!(info.days_to_expire, -1);
        assert!(!info.trusted_issuer);
    }

    #[test]
    fn test_dns_unknown_defaults() {
        let info = DnsInfo::unknown();
        assert_eq!(info.has_dns, -1);
        assert!(!info.private_ip);
    }

    #[test]
    fn test_offline_probe_never_touches_network() {
        let probe = OfflineProbe;
        assert_eq!(probe.ssl_check("example.com"), SslInfo::unknown());
        assert_eq!(probe.dns_check("example.com"), DnsInfo::unknown());
    }

    #[test]
    fn test_private_ip_detection() {
        assert!(is_private_ip("10.0.0.1".parse().unwrap()));
        assert!(is_private_ip("192.168.1.1".parse().unwrap()));
        assert!(is_private_ip("127.0.0.1".parse().unwrap()));
        assert!(!is_private_ip("8.8.8.8".parse().unwrap()));
    }

    #[test]
    fn test_resolve_host_ip_literals_skip_dns() {
        assert_eq!(resolve_host("8.8.8.8"), Some("8.8.8.8".parse().unwrap()));
        assert_eq!(resolve_host("127.0.0.1"), Some("127.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_system_probe_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SystemProbe>();
    }
}
