//! Payload heuristics.
//!
//! Classification is an ordered decision list: the first rule whose
//! predicate matches the (lowercased) payload wins. The order is a
//! deliberate priority, e.g. a SQL injection inside an HTTP request line
//! must classify as SQL injection, not HTTP reconnaissance.

use super::types::{AttackType, Severity};

struct Rule {
    name: &'static str,
    applies: fn(payload: &[u8], port: u16) -> bool,
    attack_type: AttackType,
    severity: Severity,
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

const RULES: &[Rule] = &[
    Rule {
        name: "sql keywords",
        applies: |p, _| contains(p, b"select") || contains(p, b"union") || contains(p, b"drop"),
        attack_type: AttackType::SqlInjection,
        severity: Severity::High,
    },
    Rule {
        name: "script injection",
        applies: |p, _| contains(p, b"<script") || contains(p, b"javascript:"),
        attack_type: AttackType::Xss,
        severity: Severity::High,
    },
    Rule {
        name: "path traversal",
        applies: |p, _| contains(p, b"../../../") || contains(p, b"..\\..\\"),
        attack_type: AttackType::DirectoryTraversal,
        severity: Severity::Medium,
    },
    Rule {
        name: "credential probing",
        applies: |p, _| contains(p, b"admin") || contains(p, b"root") || contains(p, b"password"),
        attack_type: AttackType::CredentialStuffing,
        severity: Severity::Medium,
    },
    Rule {
        name: "ssh port traffic",
        applies: |p, port| port == 22 && !p.is_empty(),
        attack_type: AttackType::SshScan,
        severity: Severity::Medium,
    },
    Rule {
        name: "mysql port traffic",
        applies: |p, port| port == 3306 && contains(p, b"mysql"),
        attack_type: AttackType::MysqlAttack,
        severity: Severity::High,
    },
    Rule {
        name: "rdp port traffic",
        applies: |_, port| port == 3389,
        attack_type: AttackType::RdpAttack,
        severity: Severity::High,
    },
    Rule {
        name: "http request line",
        applies: |p, _| contains(p, b"get /") || contains(p, b"post /"),
        attack_type: AttackType::HttpRecon,
        severity: Severity::Low,
    },
];

/// Maps a captured payload and its destination port to an attack category.
///
/// Matching is case-insensitive over the payload bytes. Falls through to
/// `PortScan`/`LOW` when no rule applies.
pub fn classify(payload: &[u8], port: u16) -> (AttackType, Severity) {
    let lowered = payload.to_ascii_lowercase();

    for rule in RULES {
        if (rule.applies)(&lowered, port) {
            log::debug!("payload on port {} matched rule '{}'", port, rule.name);
            return (rule.attack_type, rule.severity);
        }
    }

    (AttackType::PortScan, Severity::Low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_keywords_win_regardless_of_port() {
        for port in [21, 22, 80, 3306, 3389, 9999] {
            let (t, s) = classify(b"SELECT * FROM users", port);
            assert_eq!(t, AttackType::SqlInjection);
            assert_eq!(s, Severity::High);
        }
    }

    #[test]
    fn test_sql_injection_beats_http_recon() {
        // Contains both a request line and a UNION SELECT; rule order must
        // give SQL injection priority.
        let payload = b"GET /?id=1' UNION SELECT * FROM users-- HTTP/1.1";
        let (t, s) = classify(payload, 80);
        assert_eq!(t, AttackType::SqlInjection);
        assert_eq!(s, Severity::High);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify(b"DrOp TaBlE x", 80).0, AttackType::SqlInjection);
        assert_eq!(classify(b"<SCRIPT>alert(1)</SCRIPT>", 80).0, AttackType::Xss);
        assert_eq!(classify(b"GET / HTTP/1.1", 8080).0, AttackType::HttpRecon);
    }

    #[test]
    fn test_xss_markers() {
        assert_eq!(classify(b"<script>alert(1)", 80).0, AttackType::Xss);
        assert_eq!(classify(b"href=javascript:void(0)", 80).0, AttackType::Xss);
    }

    #[test]
    fn test_traversal_both_separator_styles() {
        let (t, s) = classify(b"GET /../../../etc/passwd", 80);
        assert_eq!(t, AttackType::DirectoryTraversal);
        assert_eq!(s, Severity::Medium);
        assert_eq!(
            classify(b"..\\..\\windows\\system32", 80).0,
            AttackType::DirectoryTraversal
        );
    }

    #[test]
    fn test_credential_probing() {
        let (t, s) = classify(b"USER anonymous\r\nPASS guest@", 21);
        assert_eq!(t, AttackType::PortScan); // no credential keyword here
        assert_eq!(s, Severity::Low);

        let (t, s) = classify(b"login: admin", 23);
        assert_eq!(t, AttackType::CredentialStuffing);
        assert_eq!(s, Severity::Medium);
    }

    #[test]
    fn test_ssh_port_any_nonempty_payload() {
        let (t, s) = classify(b"SSH-2.0-OpenSSH_8.0", 22);
        assert_eq!(t, AttackType::SshScan);
        assert_eq!(s, Severity::Medium);
        // Arbitrary bytes on 22 still count as an SSH scan
        assert_eq!(classify(b"\x00\x01\x02", 22).0, AttackType::SshScan);
    }

    #[test]
    fn test_credential_rule_beats_ssh_port_rule() {
        let (t, _) = classify(b"admin:password123", 22);
        assert_eq!(t, AttackType::CredentialStuffing);
    }

    #[test]
    fn test_mysql_requires_keyword() {
        assert_eq!(classify(b"mysql_native", 3306).0, AttackType::MysqlAttack);
        // Port 3306 without the keyword falls through to the default
        assert_eq!(classify(b"\x00\x00\x00\x0a5.7", 3306).0, AttackType::PortScan);
    }

    #[test]
    fn test_rdp_port_needs_no_payload_condition() {
        let (t, s) = classify(b"\x03\x00\x00\x13", 3389);
        assert_eq!(t, AttackType::RdpAttack);
        assert_eq!(s, Severity::High);
    }

    #[test]
    fn test_default_is_port_scan() {
        let (t, s) = classify(b"\x16\x03\x01", 443);
        assert_eq!(t, AttackType::PortScan);
        assert_eq!(s, Severity::Low);
    }
}
