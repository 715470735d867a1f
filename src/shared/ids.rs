//! Usage: Scoped identifier generation (timestamp + random suffix).

use crate::shared::time::now_unix_millis;
use rand::distributions::Alphanumeric;
use rand::Rng;

const ID_SUFFIX_LEN: usize = 9;

/// `<prefix>-<unix-millis>-<random>`. The random suffix makes two ids generated
/// within the same millisecond distinct.
pub fn new_scoped_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{prefix}-{}-{}", now_unix_millis(), suffix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_ids_carry_prefix_and_do_not_collide() {
        let a = new_scoped_id("claude");
        let b = new_scoped_id("claude");
        assert!(a.starts_with("claude-"));
        assert_ne!(a, b);
    }
}
