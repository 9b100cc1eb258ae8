//! 用户仓储

use sqlx::{PgConnection, PgPool};

use crate::error::Result;
use crate::models::{NewUser, User};

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 按邮箱查询用户
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, ip_address, referral_code, points, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// 在事务中按邮箱写入用户，返回用户 ID
    ///
    /// 邮箱已存在时只刷新 IP 地址，其余字段保持不变
    pub async fn upsert_by_email_in_tx(tx: &mut PgConnection, user: &NewUser) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, ip_address, referral_code)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET ip_address = EXCLUDED.ip_address
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.ip_address)
        .bind(&user.referral_code)
        .fetch_one(tx)
        .await?;

        Ok(id)
    }
}
