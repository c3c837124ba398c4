use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use tracing::warn;

use babel_game::{GameConfig, LevelUp, TowerProfile, grant_xp};

use crate::cache::{PROFILE_CACHE_TTL, profile_cache_key};
use crate::database::Database;

#[derive(sqlx::FromRow)]
pub(crate) struct ProfileRow {
    user_id: i64,
    xp: i64,
    level: i64,
    height: i64,
    wins: i64,
    losses: i64,
    height_reached_at: i64,
}

pub(crate) const PROFILE_COLUMNS: &str =
    "user_id, xp, level, height, wins, losses, height_reached_at";

impl ProfileRow {
    pub(crate) fn into_profile(self) -> anyhow::Result<TowerProfile> {
        let user_id = u64::try_from(self.user_id).context("user_id row out of u64 range")?;

        Ok(TowerProfile {
            user_id,
            xp: self.xp,
            level: self.level,
            height: self.height,
            wins: self.wins,
            losses: self.losses,
            height_reached_at: self.height_reached_at,
        })
    }
}

/// Read one profile, via the cache when it is warm.
pub async fn get_profile(db: &Database, user_id: u64) -> anyhow::Result<Option<TowerProfile>> {
    let cache = db.cache();
    let key = profile_cache_key(cache, user_id);

    match cache.get_json::<TowerProfile>(&key).await {
        Ok(Some(profile)) => return Ok(Some(profile)),
        Ok(None) => {}
        Err(source) => warn!(
            ?source,
            user_id, "profile cache read failed; falling back to database"
        ),
    }

    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let row: Option<ProfileRow> = sqlx::query_as(&format!(
        "SELECT {PROFILE_COLUMNS} FROM tower_profiles WHERE user_id = $1"
    ))
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    let profile = row.map(ProfileRow::into_profile).transpose()?;

    if let Some(profile) = &profile {
        if let Err(source) = cache.set_json(&key, profile, PROFILE_CACHE_TTL).await {
            warn!(?source, user_id, "profile cache write failed");
        }
    }

    Ok(profile)
}

/// Read one profile, creating it at starting values on first contact.
pub async fn get_or_create_profile(
    db: &Database,
    config: &GameConfig,
    user_id: u64,
) -> anyhow::Result<TowerProfile> {
    insert_if_absent(db.pool(), config, user_id).await?;

    get_profile(db, user_id)
        .await?
        .context("profile missing after upsert")
}

/// Idempotent full-record upsert, invalidating the read cache afterwards.
pub async fn save_profile(db: &Database, profile: &TowerProfile) -> anyhow::Result<()> {
    let user_id_i64 = i64::try_from(profile.user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO tower_profiles (user_id, xp, level, height, wins, losses, height_reached_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT (user_id) DO UPDATE SET
            xp = EXCLUDED.xp,
            level = EXCLUDED.level,
            height = EXCLUDED.height,
            wins = EXCLUDED.wins,
            losses = EXCLUDED.losses,
            height_reached_at = EXCLUDED.height_reached_at",
    )
    .bind(user_id_i64)
    .bind(profile.xp)
    .bind(profile.level)
    .bind(profile.height)
    .bind(profile.wins)
    .bind(profile.losses)
    .bind(profile.height_reached_at)
    .execute(db.pool())
    .await?;

    invalidate_profile(db, profile.user_id).await;

    Ok(())
}

/// Rewrite a profile to starting values, creating it if it never existed.
pub async fn reset_profile(
    db: &Database,
    config: &GameConfig,
    user_id: u64,
) -> anyhow::Result<TowerProfile> {
    let fresh = TowerProfile::new(user_id, config, now_unix_secs());
    save_profile(db, &fresh).await?;

    Ok(fresh)
}

/// Every known profile, unranked. Always read from the database so standings
/// built from this set reflect the latest writes.
pub async fn all_profiles(db: &Database) -> anyhow::Result<Vec<TowerProfile>> {
    let rows: Vec<ProfileRow> =
        sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM tower_profiles"))
            .fetch_all(db.pool())
            .await?;

    let mut profiles = Vec::with_capacity(rows.len());
    for row in rows {
        profiles.push(row.into_profile()?);
    }

    Ok(profiles)
}

/// Grant XP to a user inside one transaction: create the row if this is
/// their first event, lock it, cascade level-ups, and write the result back.
pub async fn award_xp(
    db: &Database,
    config: &GameConfig,
    user_id: u64,
    amount: i64,
) -> anyhow::Result<(TowerProfile, Option<LevelUp>)> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now = now_unix_secs();

    let mut tx = db.pool().begin().await?;

    insert_if_absent(&mut *tx, config, user_id).await?;

    let row: ProfileRow = sqlx::query_as(&format!(
        "SELECT {PROFILE_COLUMNS} FROM tower_profiles WHERE user_id = $1 FOR UPDATE"
    ))
    .bind(user_id_i64)
    .fetch_one(&mut *tx)
    .await?;

    let mut profile = row.into_profile()?;
    let level_up = grant_xp(&mut profile, amount, now, config);

    sqlx::query(
        "UPDATE tower_profiles
         SET xp = $2, level = $3, height = $4, height_reached_at = $5
         WHERE user_id = $1",
    )
    .bind(user_id_i64)
    .bind(profile.xp)
    .bind(profile.level)
    .bind(profile.height)
    .bind(profile.height_reached_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    invalidate_profile(db, user_id).await;

    Ok((profile, level_up))
}

/// Drop a user's cache entry after a mutation. Cache failures are logged,
/// not propagated; the short TTL bounds any staleness they leave behind.
pub(crate) async fn invalidate_profile(db: &Database, user_id: u64) {
    let key = profile_cache_key(db.cache(), user_id);
    if let Err(source) = db.cache().del(&key).await {
        warn!(?source, user_id, "profile cache invalidation failed");
    }
}

async fn insert_if_absent<'e, E>(executor: E, config: &GameConfig, user_id: u64) -> anyhow::Result<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let fresh = TowerProfile::new(user_id, config, now_unix_secs());

    sqlx::query(
        "INSERT INTO tower_profiles (user_id, xp, level, height, wins, losses, height_reached_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id_i64)
    .bind(fresh.xp)
    .bind(fresh.level)
    .bind(fresh.height)
    .bind(fresh.wins)
    .bind(fresh.losses)
    .bind(fresh.height_reached_at)
    .execute(executor)
    .await?;

    Ok(())
}

pub(crate) fn now_unix_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs() as i64)
}
