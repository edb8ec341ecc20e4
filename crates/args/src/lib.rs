#![warn(missing_docs)]
//! Typed command argument parameters with tab-completion.
//!
//! Every parameter implements [`ValueParameter`]: it consumes tokens from a
//! shared [`CommandArgs`] cursor and produces a typed value, and it can
//! complete the in-progress token of the same grammar without committing to a
//! value. Composite parameters ([`LocationParameter`]) backtrack by snapshotting
//! and restoring the cursor.
//!
//! Anything that depends on the invoking source or on live server state is
//! read from the [`CommandContext`] passed into each call.

#[macro_use]
mod static_regex;

mod args;
mod catalog;
mod choices;
mod color;
mod data;
mod datetime;
mod duration;
mod entity;
mod error;
mod literal;
mod location;
mod parameter;
mod pattern;
mod raycast;
mod text;
mod unique_id;
mod vector;
mod world;

pub use args::{CommandArgs, CursorState};
pub use catalog::{CatalogMatcher, CatalogTypeParameter};
pub use choices::{Choices, ChoicesBuilder, DynamicChoices, CHOICES_USAGE_CUTOFF};
pub use color::{nearest_color_name, ColorParameter};
pub use data::{DataContainer, DataContainerParameter};
pub use datetime::DateTimeParameter;
pub use duration::{DurationParameter, DurationValue};
pub use entity::{EntityMatcher, EntityParameter, PlayerMatcher, PlayerParameter};
pub use error::{ArgumentError, ArgumentErrorKind, ParameterBuildError};
pub use literal::Literal;
pub use location::LocationParameter;
pub use parameter::{
    complete_prefix, CatalogedValueParameter, Tristate, ValueParameter, BUILTIN_NAMESPACE,
};
pub use pattern::{NotFound, PatternMatcher, PatternMatching};
pub use raycast::{raycast, RaycastHit};
pub use text::{Text, TextFormat, TextParameter};
pub use unique_id::UuidParameter;
pub use vector::{Vector3dParameter, DEFAULT_TARGET_DISTANCE, MAX_TARGET_DISTANCE};
pub use world::{WorldMatcher, WorldPropertiesParameter, WorldSelection};

pub use mdcommand_core::CommandContext;
