//! Strongly typed HTML plugin options
//!
//! These are the shapes downstream HTML generation consumes once the raw
//! configuration has passed [`crate::schema::validate`].

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

use super::raw::RawObject;

/// Parameter mapping handed to template render and transform functions
pub type TemplateParams = BTreeMap<String, serde_json::Value>;

/// Shared handle to a user-supplied function
///
/// Equality is identity: two handles are equal when they point at the same
/// closure.
pub struct Func<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Func<F> {
    /// Borrow the underlying closure
    pub fn get(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> Clone for Func<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Func<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[function]")
    }
}

impl<F: ?Sized> PartialEq for Func<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Maps an entry-point name to an output path
pub type FilenameFn = Func<dyn Fn(&str) -> String + Send + Sync>;

/// Renders template content from the template parameters
pub type TemplateRenderFn = Func<dyn Fn(&TemplateParams) -> MaybeAsync<String> + Send + Sync>;

/// Rewrites the template parameters before rendering
pub type TemplateParamsFn =
    Func<dyn Fn(TemplateParams) -> MaybeAsync<TemplateParams> + Send + Sync>;

/// Opaque function carried by extension keys
pub type OpaqueFn = Func<dyn std::any::Any + Send + Sync>;

impl FilenameFn {
    /// Wrap a closure
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Resolve the output path for an entry point
    pub fn call(&self, entry: &str) -> String {
        (*self.0)(entry)
    }
}

impl TemplateRenderFn {
    /// Wrap a closure
    pub fn new(f: impl Fn(&TemplateParams) -> MaybeAsync<String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Render the template content
    pub fn call(&self, params: &TemplateParams) -> MaybeAsync<String> {
        (*self.0)(params)
    }
}

impl TemplateParamsFn {
    /// Wrap a closure
    pub fn new(
        f: impl Fn(TemplateParams) -> MaybeAsync<TemplateParams> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    /// Produce the final template parameters
    pub fn call(&self, params: TemplateParams) -> MaybeAsync<TemplateParams> {
        (*self.0)(params)
    }
}

impl OpaqueFn {
    /// Wrap any value standing in for a host-defined function
    pub fn new(value: impl std::any::Any + Send + Sync) -> Self {
        Self(Arc::new(value))
    }
}

/// Result of a user callable that may complete synchronously or later
///
/// The registry and the validator never poll these; sequencing is up to the
/// HTML generator.
pub enum MaybeAsync<T> {
    /// Value is available now
    Ready(T),
    /// Value is produced by a future
    Pending(Pin<Box<dyn Future<Output = T> + Send>>),
}

impl<T> MaybeAsync<T> {
    /// Wrap a future
    pub fn pending(future: impl Future<Output = T> + Send + 'static) -> Self {
        Self::Pending(Box::pin(future))
    }

    /// Await the value regardless of how it is produced
    pub async fn resolve(self) -> T {
        match self {
            Self::Ready(value) => value,
            Self::Pending(future) => future.await,
        }
    }

    /// Take the value if it is already available
    pub fn into_ready(self) -> Result<T, Self> {
        match self {
            Self::Ready(value) => Ok(value),
            pending => Err(pending),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MaybeAsync<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// Declares a closed set of string literals with `as_str`, `FromStr` and
/// the accepted values.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Accepted literal values
            pub const VALUES: &'static [&'static str] = &[$($lit),+];

            /// Literal value as written in configuration
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $lit, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $lit => Ok(Self::$variant), )+
                    _ => Err(format!(
                        "unknown {} value: {}",
                        stringify!($name),
                        s
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

literal_enum! {
    /// Where script and link tags are injected
    pub enum InjectPosition {
        /// Inside `<head>`
        Head => "head",
        /// At the end of `<body>`
        Body => "body",
    }
}

literal_enum! {
    /// How script tags are loaded
    pub enum ScriptLoading {
        /// Plain blocking `<script>`
        Blocking => "blocking",
        /// `defer` attribute
        Defer => "defer",
        /// `type="module"`
        Module => "module",
        /// `type="systemjs-module"`
        SystemjsModule => "systemjs-module",
    }
}

literal_enum! {
    /// Chunk ordering before injection
    pub enum ChunksSortMode {
        /// Dependency order decided by the generator
        Auto => "auto",
        /// Order of the `chunks` option
        Manual => "manual",
    }
}

literal_enum! {
    /// Subresource integrity hash algorithm (deprecated option)
    pub enum SriAlgorithm {
        /// SHA-256
        Sha256 => "sha256",
        /// SHA-384
        Sha384 => "sha384",
        /// SHA-512
        Sha512 => "sha512",
    }
}

literal_enum! {
    /// Browsing context of the `<base>` tag
    pub enum BaseTarget {
        /// `_self`
        SelfContext => "_self",
        /// `_blank`
        Blank => "_blank",
        /// `_parent`
        Parent => "_parent",
        /// `_top`
        Top => "_top",
    }
}

/// Output file name
#[derive(Debug, Clone, PartialEq)]
pub enum Filename {
    /// Fixed path, may contain a subdirectory
    Path(String),
    /// Computed from the entry-point name
    Function(FilenameFn),
}

/// Template content given inline
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateContent {
    /// Literal template text
    Literal(String),
    /// Rendered from the template parameters
    Render(TemplateRenderFn),
}

/// Overrides for the template parameters
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateParameters {
    /// Flat string parameters
    Map(BTreeMap<String, String>),
    /// Enable or disable the default parameters
    Toggle(bool),
    /// Transform of the default parameters
    Transform(TemplateParamsFn),
}

/// Tag injection setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inject {
    /// `true` lets the generator pick the position, `false` disables injection
    Toggle(bool),
    /// Explicit position
    Position(InjectPosition),
}

/// Structured `<base>` tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseTag {
    /// `href` attribute
    pub href: Option<String>,
    /// `target` attribute
    pub target: Option<BaseTarget>,
}

/// `<base>` tag setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base {
    /// Shorthand for `{ href }`
    Href(String),
    /// Full tag
    Tag(BaseTag),
}

/// Value of one `meta` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaTag {
    /// `<meta name="key" content="value">`
    Content(String),
    /// Explicit attribute set
    Attributes(BTreeMap<String, String>),
}

/// Validated options for one HTML plugin instance
///
/// Every documented field is optional. Keys the plugin does not know about
/// are kept in [`extra`](Self::extra) for hook consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlPluginOptions {
    /// Document title
    pub title: Option<String>,
    /// Output file, defaults to `index.html` downstream
    pub filename: Option<Filename>,
    /// Template file path
    pub template: Option<String>,
    /// Inline template, takes priority over `template`
    pub template_content: Option<TemplateContent>,
    /// Template parameter overrides
    pub template_parameters: Option<TemplateParameters>,
    /// Tag injection
    pub inject: Option<Inject>,
    /// Public path for script and link tags
    pub public_path: Option<String>,
    /// `<base>` tag
    pub base: Option<Base>,
    /// Script loading strategy
    pub script_loading: Option<ScriptLoading>,
    /// Chunks to include
    pub chunks: Option<Vec<String>>,
    /// Chunks to skip
    pub exclude_chunks: Option<Vec<String>>,
    /// Chunk ordering
    pub chunks_sort_mode: Option<ChunksSortMode>,
    /// Deprecated SRI algorithm
    pub sri: Option<SriAlgorithm>,
    /// Minify the output
    pub minify: Option<bool>,
    /// Favicon file path
    pub favicon: Option<String>,
    /// Meta tags keyed by name
    pub meta: Option<BTreeMap<String, MetaTag>>,
    /// Append the compilation hash to injected assets
    pub hash: Option<bool>,
    /// Unrecognized keys, passed through untouched
    pub extra: RawObject,
}
