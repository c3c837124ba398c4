use babel_database::Database;
use babel_game::GameConfig;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub game: GameConfig,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
