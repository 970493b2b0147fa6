//! Command implementations for chance
//!
//! Rolling commands consume the stream; inspection commands only read it.

mod inspect;
mod roll;

pub use inspect::{Peek, Replay};
pub use roll::{Pair, Roll, Task};

use anyhow::{Result, bail};
use strum::IntoEnumIterator;

/// Parses a snake_case enum name, listing the accepted names on failure.
fn parse_name<T>(text: &str) -> Result<T>
where
    T: std::str::FromStr + IntoEnumIterator + AsRef<str>,
{
    match text.replace('-', "_").parse() {
        Ok(value) => Ok(value),
        Err(_) => {
            let names: Vec<String> = T::iter().map(|value| value.as_ref().to_owned()).collect();
            bail!("unknown value `{text}`, expected one of: {}", names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chance_core::{Difficulty, Haste};

    #[test]
    fn accepts_dashes_and_any_case() {
        assert_eq!(
            parse_name::<Difficulty>("Beyond-Impossible").unwrap(),
            Difficulty::BeyondImpossible
        );
        assert_eq!(parse_name::<Haste>("extra_hasty").unwrap(), Haste::ExtraHasty);
    }

    #[test]
    fn rejection_lists_choices() {
        let err = parse_name::<Haste>("reckless").unwrap_err().to_string();
        assert!(err.contains("cautious, hasty, extra_hasty"), "{err}");
    }
}
