use anyhow::Context as _;

use babel_game::duel::{self, DuelRejection, DuelReport};
use babel_game::{GameConfig, Standings, TowerProfile};

use crate::database::Database;
use crate::impls::profiles::{PROFILE_COLUMNS, ProfileRow, invalidate_profile, now_unix_secs};

/// What came of a duel request: a rules rejection (nothing written) or a
/// resolved exchange (both rows updated in one transaction).
#[derive(Clone, Debug)]
pub enum DuelExecution {
    Rejected(DuelRejection),
    Resolved(DuelReport),
}

/// Run a full duel atomically.
///
/// Both profiles are locked `FOR UPDATE` in ascending user-id order (so two
/// concurrent duels over the same pair cannot deadlock), standings are
/// snapshotted inside the same transaction, and both rows are written before
/// commit. Rejections return before any write and roll the transaction back,
/// so a refused duel is never observable in the store. This transaction is
/// what keeps duels serialized when gateway events are handled concurrently.
pub async fn execute_duel(
    db: &Database,
    config: &GameConfig,
    challenger_id: u64,
    defender_id: u64,
) -> anyhow::Result<DuelExecution> {
    if challenger_id == defender_id {
        return Ok(DuelExecution::Rejected(DuelRejection::SelfChallenge));
    }

    let challenger_i64 = i64::try_from(challenger_id).context("challenger_id out of i64 range")?;
    let defender_i64 = i64::try_from(defender_id).context("defender_id out of i64 range")?;
    let now = now_unix_secs();

    let mut tx = db.pool().begin().await?;

    let (challenger_row, defender_row) = if challenger_i64 < defender_i64 {
        let challenger = lock_profile(&mut tx, challenger_i64).await?;
        let defender = lock_profile(&mut tx, defender_i64).await?;
        (challenger, defender)
    } else {
        let defender = lock_profile(&mut tx, defender_i64).await?;
        let challenger = lock_profile(&mut tx, challenger_i64).await?;
        (challenger, defender)
    };

    let Some(challenger) = challenger_row else {
        return Ok(DuelExecution::Rejected(DuelRejection::UnknownChallenger));
    };
    let Some(defender) = defender_row else {
        return Ok(DuelExecution::Rejected(DuelRejection::UnknownDefender));
    };

    // Standings snapshot from inside the transaction, so eligibility and
    // the written result agree on what the ladder looked like.
    let rows: Vec<ProfileRow> =
        sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM tower_profiles"))
            .fetch_all(&mut *tx)
            .await?;

    let mut profiles = Vec::with_capacity(rows.len());
    for row in rows {
        profiles.push(row.into_profile()?);
    }
    let standings = Standings::rank(profiles);

    if let Err(rejection) = duel::check_eligibility(&challenger, &defender, &standings) {
        return Ok(DuelExecution::Rejected(rejection));
    }

    let outcome = duel::roll_outcome(&mut rand::thread_rng(), config);
    let report = duel::resolve(challenger, defender, outcome, now, config);

    write_profile(&mut tx, &report.challenger).await?;
    write_profile(&mut tx, &report.defender).await?;

    tx.commit().await?;

    invalidate_profile(db, report.challenger.user_id).await;
    invalidate_profile(db, report.defender.user_id).await;

    Ok(DuelExecution::Resolved(report))
}

async fn lock_profile(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: i64,
) -> anyhow::Result<Option<TowerProfile>> {
    let row: Option<ProfileRow> = sqlx::query_as(&format!(
        "SELECT {PROFILE_COLUMNS} FROM tower_profiles WHERE user_id = $1 FOR UPDATE"
    ))
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?;

    row.map(ProfileRow::into_profile).transpose()
}

async fn write_profile(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    profile: &TowerProfile,
) -> anyhow::Result<()> {
    let user_id = i64::try_from(profile.user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "UPDATE tower_profiles
         SET xp = $2, level = $3, height = $4, wins = $5, losses = $6, height_reached_at = $7
         WHERE user_id = $1",
    )
    .bind(user_id)
    .bind(profile.xp)
    .bind(profile.level)
    .bind(profile.height)
    .bind(profile.wins)
    .bind(profile.losses)
    .bind(profile.height_reached_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
