//! Elapsed-time arguments.

use chrono::Duration;
use mdcommand_core::{CommandContext, RegistryKey};

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, CatalogedValueParameter, ValueParameter};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const DAYS_PER_WEEK: i64 = 7;

/// A parsed duration argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationValue {
    /// An explicit span (`1:30`, `2h15m`).
    Elapsed(Duration),
    /// A bare integer; the command decides whether it counts ticks or seconds.
    Raw(i64),
}

impl DurationValue {
    /// Whole seconds, treating [`DurationValue::Raw`] as seconds.
    pub fn as_seconds(&self) -> i64 {
        match self {
            Self::Elapsed(duration) => duration.num_seconds(),
            Self::Raw(count) => *count,
        }
    }
}

/// Accepts, in priority order:
///
/// 1. colon form: `m:s`, `h:m:s` or `d:h:m:s`
/// 2. suffix form: `[n]w[n]d[n]h[n]m[n]s[n]ms`, units in that order, any may be omitted
/// 3. a bare integer, returned as [`DurationValue::Raw`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationParameter;

impl DurationParameter {
    fn parse_colon(token: &str) -> Option<Duration> {
        let parts = token
            .split(':')
            .map(|part| part.parse::<i64>().ok())
            .collect::<Option<Vec<i64>>>()?;
        let (days, hours, minutes, seconds) = match parts[..] {
            [d, h, m, s] => (d, h, m, s),
            [h, m, s] => (0, h, m, s),
            [m, s] => (0, 0, m, s),
            _ => return None,
        };
        let total = days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(hours.checked_mul(SECONDS_PER_HOUR)?)?
            .checked_add(minutes.checked_mul(SECONDS_PER_MINUTE)?)?
            .checked_add(seconds)?;
        Duration::try_seconds(total)
    }

    fn parse_suffixed(token: &str) -> Option<Duration> {
        if token.is_empty() {
            return None;
        }
        let captures = regex!(
            r"(?i)^(?:(\d+)w)?(?:(\d+)d)?(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?(?:(\d+)ms)?$"
        )
        .captures(token)?;
        let group = |index: usize| -> Option<i64> {
            match captures.get(index) {
                Some(m) => m.as_str().parse::<i64>().ok(),
                None => Some(0),
            }
        };
        let days = group(1)?.checked_mul(DAYS_PER_WEEK)?.checked_add(group(2)?)?;
        let seconds = days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(group(3)?.checked_mul(SECONDS_PER_HOUR)?)?
            .checked_add(group(4)?.checked_mul(SECONDS_PER_MINUTE)?)?
            .checked_add(group(5)?)?;
        let millis = seconds.checked_mul(1000)?.checked_add(group(6)?)?;
        Duration::try_milliseconds(millis)
    }
}

impl ValueParameter for DurationParameter {
    type Value = DurationValue;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<DurationValue, ArgumentError> {
        let token = args.next()?;
        let unsupported = |args: &CommandArgs, token: &str| {
            args.error(ArgumentErrorKind::UnsupportedDurationFormat(token.to_string()))
        };

        if token.contains(':') {
            return Self::parse_colon(&token)
                .map(DurationValue::Elapsed)
                .ok_or_else(|| unsupported(args, &token));
        }
        if let Some(duration) = Self::parse_suffixed(&token) {
            return Ok(DurationValue::Elapsed(duration));
        }
        token
            .parse::<i64>()
            .map(DurationValue::Raw)
            .map_err(|_| unsupported(args, &token))
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        args.next_if_present();
        Vec::new()
    }
}

impl CatalogedValueParameter for DurationParameter {
    fn id(&self) -> RegistryKey {
        builtin_id("duration")
    }

    fn name(&self) -> &str {
        "Duration"
    }
}
