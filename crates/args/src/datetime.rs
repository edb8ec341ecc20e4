//! Local date/time arguments.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use mdcommand_core::{CommandContext, RegistryKey};

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, complete_prefix, CatalogedValueParameter, ValueParameter};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";
const COMPLETION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepts a full date-time, a time (today), or a date (midnight), tried in
/// that order against one token.
#[derive(Debug, Clone, Copy)]
pub struct DateTimeParameter {
    now: fn() -> NaiveDateTime,
}

impl Default for DateTimeParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl DateTimeParameter {
    /// Uses the local wall clock for "today".
    pub fn new() -> Self {
        Self {
            now: || Local::now().naive_local(),
        }
    }

    /// Uses `now` for "today" and for completion.
    pub fn with_clock(now: fn() -> NaiveDateTime) -> Self {
        Self { now }
    }

    fn parse_token(&self, token: &str) -> Option<NaiveDateTime> {
        if let Some(date_time) = DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(token, format).ok())
        {
            return Some(date_time);
        }
        if let Some(time) = TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(token, format).ok())
        {
            return Some((self.now)().date().and_time(time));
        }
        NaiveDate::parse_from_str(token, DATE_FORMAT)
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    }
}

impl ValueParameter for DateTimeParameter {
    type Value = NaiveDateTime;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<NaiveDateTime, ArgumentError> {
        let token = args.next()?;
        self.parse_token(&token)
            .ok_or_else(|| args.error(ArgumentErrorKind::UnparseableDateTime(token)))
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        let token = args.next_if_present().unwrap_or_default();
        complete_prefix([(self.now)().format(COMPLETION_FORMAT).to_string()], &token)
    }
}

impl CatalogedValueParameter for DateTimeParameter {
    fn id(&self) -> RegistryKey {
        builtin_id("date_time")
    }

    fn name(&self) -> &str {
        "Date-time"
    }
}
