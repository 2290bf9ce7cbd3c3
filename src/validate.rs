//! Validator registry: pure predicates over raw prompt input.
//!
//! Every validator returns a plain pass/fail; the prompt engine owns the
//! error message and the retry loop. Only the SQLite path check touches the
//! filesystem, and it treats probe failures as a failed validation.

use std::path::Path;

/// Directory-safe name: letters, digits, `_`, `-`, not starting with a digit
/// or hyphen. Used for alembic folder names and as the base project-name rule.
pub fn is_valid_directory_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Project name: a directory-safe name, or the literal `.` for "current directory".
pub fn is_valid_project_name(name: &str) -> bool {
    name == "." || is_valid_directory_name(name)
}

/// Bare identifier (auth model name): letters/digits/underscore, not starting
/// with a digit.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// SQLite database location: `:memory:`, or a file path whose parent directory
/// exists, is a directory, and is writable.
pub fn is_valid_sqlite_path(value: &str) -> bool {
    if value == ":memory:" {
        return true;
    }
    if value.is_empty() {
        return false;
    }
    let path = Path::new(value);
    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => return false,
    };
    match std::fs::metadata(parent) {
        Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
        Err(_) => false,
    }
}

/// Connection detail for non-SQLite engines: `user:password@host[:port]/dbname[?query]`.
/// The port, when present, must parse into 1..=65535 and the database name must
/// be non-empty.
pub fn is_valid_db_url(value: &str) -> bool {
    let Some((userinfo, rest)) = value.split_once('@') else {
        return false;
    };
    let Some((user, password)) = userinfo.split_once(':') else {
        return false;
    };
    if user.is_empty() || !user.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    if password.is_empty() {
        return false;
    }

    let Some((host_port, db_part)) = rest.split_once('/') else {
        return false;
    };
    let dbname = match db_part.split_once('?') {
        Some((name, _query)) => name,
        None => db_part,
    };
    if dbname.is_empty() || !dbname.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }

    let host = match host_port.split_once(':') {
        Some((host, port)) => {
            if !is_valid_db_port(port) {
                return false;
            }
            host
        }
        None => host_port,
    };
    !host.is_empty() && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// RFC-1123-style hostname: dot-separated labels of 1-63 alphanumerics or
/// hyphens, no leading/trailing hyphen, and an alphabetic final label of at
/// least two characters.
pub fn is_valid_smtp_host(host: &str) -> bool {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let (last, rest) = labels.split_last().unwrap_or((&"", &[]));
    if last.len() < 2 || !last.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    rest.iter().all(|label| is_valid_hostname_label(label))
}

fn is_valid_hostname_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

// Up to five digits, parsed value within 1..=65535. Leading zeros are
// tolerated here but not in the SMTP port rule.
fn is_valid_db_port(port: &str) -> bool {
    if port.is_empty() || port.len() > 5 || !port.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(port.parse::<u32>(), Ok(n) if (1..=65535).contains(&n))
}

/// Digits only, no leading zero, value within 1..=65535.
pub fn is_valid_smtp_port(port: &str) -> bool {
    !port.starts_with('0') && is_valid_db_port(port)
}

/// Email-shaped SMTP username: `local@hostname`.
pub fn is_valid_smtp_username(username: &str) -> bool {
    let Some((local, host)) = username.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
    {
        return false;
    }
    is_valid_smtp_host(host)
}

/// Allowed signup fields for the auth model.
pub const AUTH_FIELDS: [&str; 3] = ["email", "username", "phone"];

/// Comma-separated list where every trimmed token is one of `email`,
/// `username`, `phone`. Duplicates are tolerated; empty tokens are not.
pub fn is_valid_required_fields(value: &str) -> bool {
    value.split(',').all(|field| AUTH_FIELDS.contains(&field.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn project_name_accepts_identifiers_and_dot() {
        assert!(is_valid_project_name("myapp"));
        assert!(is_valid_project_name("_private"));
        assert!(is_valid_project_name("my-app_2"));
        assert!(is_valid_project_name("."));
    }

    #[test]
    fn project_name_rejects_invalid() {
        assert!(!is_valid_project_name(""));
        assert!(!is_valid_project_name("2fast"));
        assert!(!is_valid_project_name("-app"));
        assert!(!is_valid_project_name("my app"));
        assert!(!is_valid_project_name("app/sub"));
        assert!(!is_valid_project_name(".."));
    }

    #[test]
    fn identifier_rejects_leading_digit_and_punctuation() {
        assert!(is_valid_identifier("User"));
        assert!(is_valid_identifier("_User2"));
        assert!(!is_valid_identifier("2User"));
        assert!(!is_valid_identifier("User-Model"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn sqlite_accepts_memory_literal() {
        assert!(is_valid_sqlite_path(":memory:"));
    }

    #[test]
    fn sqlite_requires_existing_writable_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let inside = dir.path().join("app.db");
        assert!(is_valid_sqlite_path(inside.to_str().unwrap()));

        let missing = dir.path().join("nope").join("app.db");
        assert!(!is_valid_sqlite_path(missing.to_str().unwrap()));
    }

    #[test]
    fn db_url_accepts_standard_forms() {
        assert!(is_valid_db_url("user:pass@localhost/app"));
        assert!(is_valid_db_url("user:pass@db.example.com:5432/app_db"));
        assert!(is_valid_db_url("u1:s3cret@10.0.0.2/app?sslmode=require"));
    }

    #[test]
    fn db_url_rejects_malformed() {
        assert!(!is_valid_db_url("userpass@localhost/app"));
        assert!(!is_valid_db_url("user:pass@localhost"));
        assert!(!is_valid_db_url("user:pass@localhost/"));
        assert!(!is_valid_db_url("user:pass@/app"));
        assert!(!is_valid_db_url("user:@localhost/app"));
        assert!(!is_valid_db_url(":pass@localhost/app"));
        assert!(!is_valid_db_url("user:pass@localhost:0/app"));
        assert!(!is_valid_db_url("user:pass@localhost:99999/app"));
        assert!(!is_valid_db_url("user:pass@localhost:abc/app"));
    }

    #[test]
    fn smtp_host_requires_dot_and_alpha_tld() {
        assert!(is_valid_smtp_host("smtp.gmail.com"));
        assert!(is_valid_smtp_host("mail-1.example.co"));
        assert!(!is_valid_smtp_host("localhost"));
        assert!(!is_valid_smtp_host("smtp..com"));
        assert!(!is_valid_smtp_host("-bad.example.com"));
        assert!(!is_valid_smtp_host("smtp.example.c"));
        assert!(!is_valid_smtp_host("smtp.example.c0m"));
    }

    #[test]
    fn smtp_port_boundaries() {
        assert!(is_valid_smtp_port("1"));
        assert!(is_valid_smtp_port("587"));
        assert!(is_valid_smtp_port("65535"));
        assert!(!is_valid_smtp_port("0"));
        assert!(!is_valid_smtp_port("0587"));
        assert!(!is_valid_smtp_port("65536"));
        assert!(!is_valid_smtp_port(""));
        assert!(!is_valid_smtp_port("25a"));
    }

    #[test]
    fn smtp_username_is_email_shaped() {
        assert!(is_valid_smtp_username("bot@example.com"));
        assert!(is_valid_smtp_username("first.last+tag@mail.example.org"));
        assert!(!is_valid_smtp_username("no-at-sign"));
        assert!(!is_valid_smtp_username("@example.com"));
        assert!(!is_valid_smtp_username("user@localhost"));
    }

    #[test]
    fn required_fields_tokens() {
        assert!(is_valid_required_fields("email"));
        assert!(is_valid_required_fields("email,username"));
        assert!(is_valid_required_fields(" email , phone "));
        assert!(is_valid_required_fields("email,email"));
        assert!(!is_valid_required_fields(""));
        assert!(!is_valid_required_fields("email,"));
        assert!(!is_valid_required_fields("Email"));
        assert!(!is_valid_required_fields("email,address"));
    }

    proptest! {
        #[test]
        fn smtp_port_accepts_iff_in_range(n in 0u32..100_000) {
            let text = n.to_string();
            prop_assert_eq!(is_valid_smtp_port(&text), (1..=65535).contains(&n));
        }

        #[test]
        fn db_url_port_in_range_is_accepted(
            user in "[a-z][a-z0-9_]{0,8}",
            pass in "[a-zA-Z0-9!#]{1,12}",
            host in "[a-z]{1,10}(\\.[a-z]{2,6}){0,2}",
            port in 1u32..=65535,
            db in "[a-z][a-z0-9_]{0,10}",
        ) {
            let url = format!("{user}:{pass}@{host}:{port}/{db}");
            prop_assert!(is_valid_db_url(&url));
        }

        #[test]
        fn db_url_without_dbname_is_rejected(
            user in "[a-z][a-z0-9_]{0,8}",
            pass in "[a-zA-Z0-9]{1,12}",
            host in "[a-z]{1,10}",
        ) {
            let url = format!("{user}:{pass}@{host}/");
            prop_assert!(!is_valid_db_url(&url));
        }
    }
}
