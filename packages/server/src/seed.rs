use sea_orm::*;
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::{footer, setting, user};
use crate::utils::hash;

/// Ensure the singleton settings and footer rows exist.
///
/// Both tables hold exactly one row with id 1; handlers update it in place.
pub async fn ensure_singletons(db: &DatabaseConnection) -> Result<(), DbErr> {
    if setting::Entity::find_by_id(1).one(db).await?.is_none() {
        let row = setting::ActiveModel {
            id: Set(1),
            school_name: Set(String::new()),
            phone: Set(String::new()),
            email: Set(String::new()),
            theme_color: Set("#2563eb".to_string()),
            logo: Set(String::new()),
            favicon: Set(String::new()),
            intro_title: Set(String::new()),
            intro_html: Set(String::new()),
            intro_image: Set(String::new()),
            meta_title: Set(String::new()),
            meta_description: Set(String::new()),
            meta_keywords: Set(String::new()),
            og_title: Set(String::new()),
            og_description: Set(String::new()),
            og_image: Set(String::new()),
            updated_at: Set(chrono::Utc::now()),
        };
        setting::Entity::insert(row).exec_without_returning(db).await?;
        info!("Seeded default settings row");
    }

    if footer::Entity::find_by_id(1).one(db).await?.is_none() {
        let row = footer::ActiveModel {
            id: Set(1),
            col1_title: Set(String::new()),
            col1_links: Set("[]".to_string()),
            col2_title: Set(String::new()),
            col2_links: Set("[]".to_string()),
            col3_title: Set(String::new()),
            col3_links: Set("[]".to_string()),
            socials: Set("{}".to_string()),
            copyright_text: Set(String::new()),
        };
        footer::Entity::insert(row).exec_without_returning(db).await?;
        info!("Seeded default footer row");
    }

    Ok(())
}

/// Create the initial admin account when no users exist yet.
pub async fn seed_admin_user(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    if user::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let hashed = hash::hash_password(&auth.admin_password)
        .map_err(|e| anyhow::anyhow!("failed to hash admin password: {e}"))?;

    let admin = user::ActiveModel {
        username: Set(auth.admin_username.clone()),
        password: Set(hashed),
        role: Set("admin".to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    user::Entity::insert(admin).exec_without_returning(db).await?;
    info!("Seeded admin user '{}'", auth.admin_username);

    Ok(())
}
