//! Property-based tests for the leaf parameters
//!
//! Validates:
//! - Colon and suffix durations agree on elapsed time
//! - Every color spelling of the same RGB triple parses to the same color
//! - Out-of-range color components never parse
//! - Relative vector components offset the source position

use glam::DVec3;
use mdcommand_args::{
    nearest_color_name, ArgumentErrorKind, ColorParameter, CommandArgs, DurationParameter,
    DurationValue, ValueParameter, Vector3dParameter,
};
use mdcommand_core::{Color, Location, NAMED_COLORS};
use mdcommand_testkit::{fixture_world, TestContext};
use proptest::prelude::*;

fn duration(raw: &str) -> Result<DurationValue, ArgumentErrorKind> {
    DurationParameter
        .parse(&TestContext::console(), &mut CommandArgs::parse(raw).unwrap())
        .map_err(|err| err.into_kind())
}

fn color(raw: &str) -> Result<Color, ArgumentErrorKind> {
    ColorParameter
        .parse(&TestContext::console(), &mut CommandArgs::parse(raw).unwrap())
        .map_err(|err| err.into_kind())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ca != *cb));
            diagonal = above;
        }
    }
    row[b.len()]
}

proptest! {
    /// Property: `d:h:m:s`, `h:m:s` and `[n]d[n]h[n]m[n]s` denote the same span
    #[test]
    fn colon_and_suffix_durations_agree(
        days in 0i64..30,
        hours in 0i64..24,
        minutes in 0i64..60,
        seconds in 0i64..60,
    ) {
        let expected = days * 86_400 + hours * 3_600 + minutes * 60 + seconds;

        let colon = duration(&format!("{days}:{hours}:{minutes}:{seconds}")).unwrap();
        let suffix = duration(&format!("{days}d{hours}h{minutes}m{seconds}s")).unwrap();
        let bare = duration(&expected.to_string()).unwrap();

        prop_assert_eq!(colon.as_seconds(), expected);
        prop_assert_eq!(suffix.as_seconds(), expected);
        prop_assert_eq!(colon, suffix);
        prop_assert_eq!(bare, DurationValue::Raw(expected));
    }

    /// Property: weeks fold into days
    #[test]
    fn weeks_are_seven_days(weeks in 0i64..100) {
        let by_weeks = duration(&format!("{weeks}w")).unwrap();
        let by_days = duration(&format!("{}d", weeks * 7)).unwrap();
        prop_assert_eq!(by_weeks, by_days);
    }

    /// Property: every spelling of an RGB triple yields the same color
    #[test]
    fn color_forms_agree(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let expected = Color::new(r, g, b);
        prop_assert_eq!(color(&format!("{r},{g},{b}")), Ok(expected));
        prop_assert_eq!(color(&format!("{r} {g} {b}")), Ok(expected));
        prop_assert_eq!(color(&format!("0x{r:02x}{g:02x}{b:02x}")), Ok(expected));
        prop_assert_eq!(color(&format!("#{r:02X}{g:02X}{b:02X}")), Ok(expected));
    }

    /// Property: a component above 255 is a range error wherever it appears
    #[test]
    fn oversized_components_are_rejected(
        big in 256i64..100_000,
        small in 0u8..=255,
        position in 0usize..3,
    ) {
        let mut parts = [small.to_string(), small.to_string(), small.to_string()];
        parts[position] = big.to_string();
        let result = color(&parts.join(","));
        prop_assert_eq!(result, Err(ArgumentErrorKind::ComponentTooLarge(big.to_string())));
    }

    /// Property: a negative component never parses
    #[test]
    fn negative_components_never_parse(
        negative in -100_000i64..0,
        small in 0u8..=255,
        position in 0usize..3,
    ) {
        let mut parts = [small.to_string(), small.to_string(), small.to_string()];
        parts[position] = negative.to_string();
        prop_assert!(color(&parts.join(" ")).is_err());
        if position > 0 {
            prop_assert_eq!(
                color(&parts.join(" ")),
                Err(ArgumentErrorKind::ComponentTooSmall(negative.to_string()))
            );
        }
    }

    /// Property: unknown names suggest a table entry at minimal edit distance
    #[test]
    fn suggestion_has_minimal_distance(name in "[a-z_]{1,12}") {
        prop_assume!(Color::named(&name).is_none());
        let suggestion = nearest_color_name(&name);
        let best = NAMED_COLORS
            .iter()
            .map(|(candidate, _)| levenshtein(&name, candidate))
            .min()
            .unwrap();
        prop_assert_eq!(levenshtein(&name, suggestion), best);
        let first_best = NAMED_COLORS
            .iter()
            .find(|(candidate, _)| levenshtein(&name, candidate) == best)
            .map(|(candidate, _)| *candidate)
            .unwrap();
        prop_assert_eq!(suggestion, first_best);
        let is_unknown_name = matches!(
            color(&name),
            Err(ArgumentErrorKind::UnknownColorName { suggestion: s, .. }) if s == first_best
        );
        prop_assert!(is_unknown_name);
    }

    /// Property: `~ ~1 ~` is one block above the source
    #[test]
    fn relative_vector_offsets_source_position(
        x in -30_000_000.0f64..30_000_000.0,
        y in -64.0f64..320.0,
        z in -30_000_000.0f64..30_000_000.0,
        dx in -1_000i32..1_000,
    ) {
        let ctx = TestContext::console()
            .at(Location::new(fixture_world("world"), DVec3::new(x, y, z)));
        let parse = |raw: &str| {
            Vector3dParameter::new()
                .parse(&ctx, &mut CommandArgs::parse(raw).unwrap())
                .unwrap()
        };

        prop_assert_eq!(parse("~ ~1 ~"), DVec3::new(x, y + 1.0, z));
        prop_assert_eq!(parse(&format!("~{dx} ~ ~")), DVec3::new(x + f64::from(dx), y, z));
    }
}

#[test]
fn relative_vector_without_source_position() {
    let result = Vector3dParameter::new().parse(
        &TestContext::console(),
        &mut CommandArgs::parse("~ ~1 ~").unwrap(),
    );
    assert_eq!(result.unwrap_err().into_kind(), ArgumentErrorKind::NoContextPosition);
}
