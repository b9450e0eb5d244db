//! Canned service banners.
//!
//! Each monitored port answers with a fixed byte sequence mimicking the
//! greeting of the real service, enough to keep a scanner or attacker
//! talking for one more round trip. There is no protocol negotiation.

/// Returns the banner to send on a given port, or an empty slice meaning
/// "send nothing".
pub fn banner_for(port: u16) -> &'static [u8] {
    match port {
        21 => b"220 ProFTPD 1.3.5 Server (Debian) [::ffff:192.168.1.1]\r\n",
        22 => b"SSH-2.0-OpenSSH_7.4\r\n",
        23 => b"Ubuntu 18.04.3 LTS\nlogin: ",
        25 => b"220 smtp.example.com ESMTP Postfix\r\n",
        80 => b"HTTP/1.1 200 OK\r\nServer: Apache/2.4.41 (Ubuntu)\r\n\r\n",
        110 => b"+OK POP3 server ready\r\n",
        143 => b"* OK [CAPABILITY IMAP4rev1] IMAP4 Server\r\n",
        443 => b"HTTP/1.1 200 OK\r\nServer: nginx/1.18.0\r\n\r\n",
        3306 => b"\x4a\x00\x00\x00\x0a5.7.31-0ubuntu0.18.04.1\x00",
        3389 => b"\x03\x00\x00\x13\x0e\xd0\x00\x00\x124\x00",
        5432 => b"PostgreSQL 12.4 on x86_64-pc-linux-gnu",
        8080 => b"HTTP/1.1 200 OK\r\nServer: Tomcat/9.0.37\r\n\r\n",
        _ => b"",
    }
}
