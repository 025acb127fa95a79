use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use common::error::Res;

const MAX_SUFFIX_ATTEMPTS: u32 = 5;
const MAX_BASE_LEN: usize = 24;

/// Derives a username base from the email local part, keeping only
/// `[a-z0-9_]` and capping the length.
pub fn sanitize_base(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    let mut base: String = local
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(MAX_BASE_LEN)
        .collect();
    if base.is_empty() {
        base.push_str("trader");
    }
    base
}

/// Picks a free username for a federated signup: the bare base first, then a
/// bounded number of random numeric suffixes, then a UUID suffix that cannot
/// collide. Never loops unboundedly.
pub async fn generate_unique(pool: &PgPool, email: &str) -> Res<String> {
    let base = sanitize_base(email);
    if !db::user::exists_by_username(pool, &base).await? {
        return Ok(base);
    }

    for _ in 0..MAX_SUFFIX_ATTEMPTS {
        let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
        let candidate = format!("{}{}", base, suffix);
        if !db::user::exists_by_username(pool, &candidate).await? {
            return Ok(candidate);
        }
    }

    Ok(format!("{}-{}", base, Uuid::new_v4().simple()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_strips_punctuation_and_lowercases() {
        assert_eq!(sanitize_base("New.User+tag@example.com"), "newusertag");
        assert_eq!(sanitize_base("trader_01@example.com"), "trader_01");
    }

    #[test]
    fn base_is_length_capped() {
        let email = format!("{}@example.com", "a".repeat(80));
        assert_eq!(sanitize_base(&email).len(), MAX_BASE_LEN);
    }

    #[test]
    fn empty_local_part_falls_back() {
        assert_eq!(sanitize_base("@example.com"), "trader");
        assert_eq!(sanitize_base("++@example.com"), "trader");
    }
}
