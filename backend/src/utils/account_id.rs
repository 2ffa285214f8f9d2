use rand::{Rng, distributions::Alphanumeric};

/// Length of a generated account identifier.
pub const ACCOUNT_ID_LENGTH: usize = 24;

/// Generates a random account identifier.
///
/// Identifiers are opaque strings of 24 lowercase-alphanumeric characters,
/// matching the format accepted by the account path routes.
pub fn generate_account_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ACCOUNT_ID_LENGTH)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_24_lowercase_alphanumeric_chars() {
        for _ in 0..32 {
            let id = generate_account_id();
            assert_eq!(id.len(), ACCOUNT_ID_LENGTH);
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_account_id(), generate_account_id());
    }
}
