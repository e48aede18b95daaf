//! Option shapes for the HTML plugin
//!
//! This module provides:
//! - [`RawValue`], the untyped input handed to the validator
//! - [`HtmlPluginOptions`], the typed result consumed by HTML generation
//! - Tagged function wrappers for the callable option forms

pub mod raw;
pub mod types;

pub use raw::{Callable, CallableKind, RawObject, RawValue};
pub use types::{
    Base, BaseTag, BaseTarget, ChunksSortMode, Filename, FilenameFn, Func, HtmlPluginOptions,
    Inject, InjectPosition, MaybeAsync, MetaTag, OpaqueFn, ScriptLoading, SriAlgorithm,
    TemplateContent, TemplateParameters, TemplateParams, TemplateParamsFn, TemplateRenderFn,
};
