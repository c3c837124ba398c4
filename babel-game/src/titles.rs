/// A level's flavor title and its one-line description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Title {
    pub name: String,
    pub flavor: String,
}

// Indexed directly by level; entry 0 is unreachable since towers start at
// level 1, but keeping it preserves the level == index mapping.
const TITLES: &[(&str, &str)] = &[
    ("🧱 Bricklayer", "Your tower has a base, but it's giving patio vibes."),
    ("🧙 Seeker", "Your tower casts a slightly concerning shadow."),
    ("🏰 Apprentice Architect", "It's standing... barely."),
    ("🗼 Tower Tinkerer", "You've added your first gargoyle. It farts."),
    ("🔮 Ascending Adept", "Something magical stirs in your foundation."),
    ("⚙️ Spire Smith", "It rises... mysteriously."),
    ("🔥 Spire Forger", "People are starting to notice your spire."),
    ("🌩️ Height Enthusiast", "You dream in altitude."),
    ("🌌 Tower Whisperer", "The tower speaks back sometimes."),
    ("💀 Girth Lord", "Your tower is feared in tavern tales."),
];

/// Flavor title for a level. Levels past the end of the table get a
/// generated fallback so progression never runs out of titles.
pub fn title_for_level(level: i64) -> Title {
    let index = usize::try_from(level).ok().filter(|i| *i < TITLES.len());

    match index {
        Some(index) => {
            let (name, flavor) = TITLES[index];
            Title {
                name: name.to_owned(),
                flavor: flavor.to_owned(),
            }
        }
        None => Title {
            name: format!("🌟 Sky Seeker Lv.{level}"),
            flavor: "The clouds part as you rise ever higher.".to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{TITLES, title_for_level};

    #[test]
    fn table_levels_use_the_table() {
        assert_eq!(title_for_level(1).name, "🧙 Seeker");
        assert_eq!(title_for_level(9).name, "💀 Girth Lord");
    }

    #[test]
    fn levels_past_the_table_get_a_generated_title() {
        let past_end = TITLES.len() as i64;

        assert_eq!(title_for_level(past_end).name, "🌟 Sky Seeker Lv.10");
        assert_eq!(title_for_level(250).name, "🌟 Sky Seeker Lv.250");
        assert!(!title_for_level(250).flavor.is_empty());
    }
}
