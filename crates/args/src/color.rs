//! RGB colors from hex, components or names.

use std::num::IntErrorKind;

use mdcommand_core::color::NAMED_COLORS;
use mdcommand_core::{Color, CommandContext, RegistryKey};

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, complete_prefix, CatalogedValueParameter, ValueParameter};

/// Accepts, in priority order:
///
/// 1. `0xRRGGBB` or `#RRGGBB`
/// 2. `r,g,b` in one token, or `r g b` across three tokens
/// 3. a name from [`NAMED_COLORS`], ignoring case
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorParameter;

impl ColorParameter {
    fn parse_hex(digits: &str, args: &CommandArgs) -> Result<Color, ArgumentError> {
        u32::from_str_radix(digits, 16)
            .map(Color::from_rgb)
            .map_err(|_| args.error(ArgumentErrorKind::NotHexadecimal(digits.to_string())))
    }

    fn parse_component(input: &str, args: &CommandArgs) -> Result<u8, ArgumentError> {
        let value = input.trim().parse::<i64>().map_err(|err| {
            args.error(match err.kind() {
                IntErrorKind::PosOverflow => ArgumentErrorKind::ComponentTooLarge(input.to_string()),
                IntErrorKind::NegOverflow => ArgumentErrorKind::ComponentTooSmall(input.to_string()),
                _ => ArgumentErrorKind::ComponentNotANumber(input.to_string()),
            })
        })?;
        if value < 0 {
            return Err(args.error(ArgumentErrorKind::ComponentTooSmall(input.to_string())));
        }
        u8::try_from(value)
            .map_err(|_| args.error(ArgumentErrorKind::ComponentTooLarge(input.to_string())))
    }
}

impl ValueParameter for ColorParameter {
    type Value = Color;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<Color, ArgumentError> {
        let token = args.next()?;

        if let Some(digits) = token.strip_prefix("0x").or_else(|| token.strip_prefix('#')) {
            return Self::parse_hex(digits, args);
        }

        if regex!(r"^[0-9,]+$").is_match(&token) {
            let components: Vec<String> = if token.contains(',') {
                let parts: Vec<String> = token.split(',').map(str::to_string).collect();
                if parts.len() != 3 {
                    return Err(args.error(ArgumentErrorKind::WrongComponentCount {
                        expected: 3,
                        found: parts.len(),
                    }));
                }
                parts
            } else {
                vec![token, args.next()?, args.next()?]
            };
            let r = Self::parse_component(&components[0], args)?;
            let g = Self::parse_component(&components[1], args)?;
            let b = Self::parse_component(&components[2], args)?;
            return Ok(Color::new(r, g, b));
        }

        Color::named(&token).ok_or_else(|| {
            args.error(ArgumentErrorKind::UnknownColorName {
                suggestion: nearest_color_name(&token).to_string(),
                input: token,
            })
        })
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        let prefix = args.next_if_present().unwrap_or_default();
        complete_prefix(NAMED_COLORS.iter().map(|(name, _)| *name), &prefix)
    }
}

impl CatalogedValueParameter for ColorParameter {
    fn id(&self) -> RegistryKey {
        builtin_id("color")
    }

    fn name(&self) -> &str {
        "Color"
    }
}

/// The named color with the smallest Levenshtein distance to `input`
/// (ignoring case). Ties go to the alphabetically first name.
pub fn nearest_color_name(input: &str) -> &'static str {
    let input = input.to_lowercase();
    let mut best = NAMED_COLORS[0].0;
    let mut best_distance = usize::MAX;
    for (name, _) in NAMED_COLORS {
        let distance = edit_distance(&input, name);
        if distance < best_distance {
            best = name;
            best_distance = distance;
        }
    }
    best
}

fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdcommand_testkit::TestContext;

    fn parse(raw: &str) -> Result<Color, ArgumentError> {
        ColorParameter.parse(&TestContext::console(), &mut CommandArgs::parse(raw).unwrap())
    }

    fn kind(raw: &str) -> ArgumentErrorKind {
        parse(raw).unwrap_err().into_kind()
    }

    #[test]
    fn hex_forms() {
        assert_eq!(parse("0xFF8800"), Ok(Color::new(255, 136, 0)));
        assert_eq!(parse("#00ff00"), Ok(Color::new(0, 255, 0)));
        assert_eq!(kind("#zz"), ArgumentErrorKind::NotHexadecimal("zz".into()));
        assert_eq!(kind("0x"), ArgumentErrorKind::NotHexadecimal("".into()));
    }

    #[test]
    fn component_forms() {
        assert_eq!(parse("10,20,30"), Ok(Color::new(10, 20, 30)));
        assert_eq!(parse("10 20 30"), Ok(Color::new(10, 20, 30)));
        assert_eq!(
            kind("1,2"),
            ArgumentErrorKind::WrongComponentCount {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            kind("1,2,3,4"),
            ArgumentErrorKind::WrongComponentCount {
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn component_ranges() {
        assert_eq!(kind("256,0,0"), ArgumentErrorKind::ComponentTooLarge("256".into()));
        assert_eq!(kind("0 -1 0"), ArgumentErrorKind::ComponentTooSmall("-1".into()));
        assert_eq!(kind("0 0 blue"), ArgumentErrorKind::ComponentNotANumber("blue".into()));
        assert_eq!(kind("1,,2"), ArgumentErrorKind::ComponentNotANumber("".into()));
        assert_eq!(
            kind("99999999999999999999,0,0"),
            ArgumentErrorKind::ComponentTooLarge("99999999999999999999".into())
        );
    }

    #[test]
    fn three_token_form_needs_three_tokens() {
        assert_eq!(kind("12 34"), ArgumentErrorKind::NoMoreTokens);
    }

    #[test]
    fn named_colors_and_suggestions() {
        assert_eq!(parse("RED"), Ok(Color::from_rgb(0xFF0000)));
        assert_eq!(
            kind("gren"),
            ArgumentErrorKind::UnknownColorName {
                input: "gren".into(),
                suggestion: "green".into()
            }
        );
        let message = parse("purpel").unwrap_err().to_string();
        assert_eq!(message, "Unknown color 'purpel'. Did you mean 'purple'?");
    }

    #[test]
    fn suggestion_ties_go_to_first_name() {
        assert_eq!(edit_distance("bed", "red"), 1);
        assert_eq!(nearest_color_name("BED"), "red");
        // Distance 4 from every four-letter name and from "red".
        assert_eq!(edit_distance("xxxx", "pink"), 4);
        assert_eq!(edit_distance("xxxx", "red"), 4);
        assert_eq!(nearest_color_name("xxxx"), "blue");
    }

    #[test]
    fn completes_names_only() {
        let ctx = TestContext::console();
        let complete = |raw: &str| ColorParameter.complete(&ctx, &mut CommandArgs::for_completion(raw));
        assert_eq!(complete("dark"), vec!["dark_cyan", "dark_green", "dark_magenta"]);
        assert_eq!(complete("P"), vec!["pink", "purple"]);
        assert!(complete("#ff").is_empty());
        assert!(complete("12").is_empty());
    }
}
