use crate::config::AppConfig;
use crate::errors::SchoolHubError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 哈希密码
pub fn hash_password(password: &str) -> Result<String, SchoolHubError> {
    let config = AppConfig::get();
    let params = Params::new(
        config.argon2.memory_cost,
        config.argon2.time_cost,
        config.argon2.parallelism,
        None,
    )
    .map_err(|e| SchoolHubError::validation(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SchoolHubError::validation(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证密码
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// 生成随机初始密码（满足密码策略）
pub fn generate_initial_password(len: usize) -> String {
    use rand::Rng;
    use rand::distr::Alphanumeric;

    let len = len.max(12);
    let mut rng = rand::rng();
    loop {
        let candidate: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        if super::validate::validate_password(&candidate).is_valid {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Monrovia2025").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Monrovia2025", &hash));
        assert!(!verify_password("monrovia2025", &hash));
        assert!(!verify_password("Monrovia2025", "not-a-hash"));
    }

    #[test]
    fn test_generated_password_meets_policy() {
        for _ in 0..5 {
            let password = generate_initial_password(8);
            assert_eq!(password.len(), 12);
            assert!(super::super::validate::validate_password(&password).is_valid);
        }
    }
}
