//! Meninos de Ouro roster API
//!
//! Staff accounts register students, browse and search the roster, and draw
//! randomized fixed-size teams from a selected subset.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};
use infrastructure::draw::DrawService;
use infrastructure::student::{FsPhotoStore, InMemoryStudentRepository, StudentService};
use infrastructure::user::{Argon2Hasher, CreateUserRequest, InMemoryUserRepository, UserService};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let student_repository = Arc::new(InMemoryStudentRepository::new());
    let photo_store = Arc::new(FsPhotoStore::new(&config.media.dir));
    let student_service = Arc::new(StudentService::new(
        student_repository.clone(),
        photo_store,
    ));

    let draw_service = Arc::new(DrawService::new(
        student_repository,
        config.draw.group_size,
    ));

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let password_hasher = Arc::new(Argon2Hasher::new());
    let user_service: Arc<dyn api::state::UserServiceTrait> =
        Arc::new(UserService::new(user_repository, password_hasher));

    create_initial_staff_account(user_service.as_ref()).await?;

    let jwt_service = create_jwt_service(config);

    Ok(AppState::new(
        student_service,
        user_service,
        draw_service,
        jwt_service,
    ))
}

/// Generate a random alphanumeric secret
fn generate_random_secret(length: usize) -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Create the session token service from config, env var or a random secret
fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "No JWT_SECRET configured. Generating a random secret; \
                sessions will NOT survive a restart."
            );
            generate_random_secret(64)
        });

    Arc::new(JwtService::new(JwtConfig::new(
        secret,
        config.auth.jwt_expiration_hours,
    )))
}

/// Create the initial staff account when the store is empty
async fn create_initial_staff_account(
    user_service: &dyn api::state::UserServiceTrait,
) -> anyhow::Result<()> {
    if user_service.count().await? > 0 {
        return Ok(());
    }

    let (password, from_env) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, true),
        _ => (generate_random_secret(16), false),
    };

    let request = CreateUserRequest {
        email: "admin@meninosdeouro.org".to_string(),
        password: password.clone(),
    };

    user_service.create(request).await?;

    info!("===========================================");
    info!("Initial staff account created!");
    info!("Email: admin@meninosdeouro.org");

    if from_env {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }

    info!("Please change this password after first login.");
    info!("===========================================");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_bootstraps_staff_account() {
        let config = AppConfig::default();
        let state = create_app_state(&config).await.unwrap();

        assert_eq!(state.user_service.count().await.unwrap(), 1);

        let roster = state
            .student_service
            .count(domain::student::StudentQuery::new())
            .await
            .unwrap();
        assert_eq!(roster, 0);
    }

    #[test]
    fn test_generate_random_secret_length_and_charset() {
        let secret = generate_random_secret(64);

        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
