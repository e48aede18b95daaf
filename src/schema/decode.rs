//! Conversion of schema-checked raw options into typed options

use log::warn;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::issue::{ValidationError, ValidationIssue};
use super::shape::{child_path, index_path};
use crate::options::{
    Base, BaseTag, Callable, Filename, HtmlPluginOptions, Inject, MetaTag, RawObject, RawValue,
    TemplateContent, TemplateParameters,
};

type Decoded<T> = Result<T, ValidationIssue>;

fn unexpected(path: &str, expected: &str, value: &RawValue) -> ValidationIssue {
    ValidationIssue::new(
        path,
        format!("expected {}, received {}", expected, value.kind_name()),
    )
}

fn string(value: &RawValue, path: &str) -> Decoded<String> {
    match value {
        RawValue::String(s) => Ok(s.clone()),
        other => Err(unexpected(path, "string", other)),
    }
}

fn boolean(value: &RawValue, path: &str) -> Decoded<bool> {
    match value {
        RawValue::Bool(b) => Ok(*b),
        other => Err(unexpected(path, "boolean", other)),
    }
}

fn literal<T: FromStr<Err = String>>(value: &RawValue, path: &str) -> Decoded<T> {
    let s = string(value, path)?;
    s.parse().map_err(|e: String| ValidationIssue::new(path, e))
}

fn string_list(value: &RawValue, path: &str) -> Decoded<Vec<String>> {
    match value {
        RawValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| string(item, &index_path(path, i)))
            .collect(),
        other => Err(unexpected(path, "array", other)),
    }
}

fn string_map(value: &RawValue, path: &str) -> Decoded<BTreeMap<String, String>> {
    match value {
        RawValue::Object(map) => map
            .iter()
            .map(|(k, v)| -> Decoded<(String, String)> {
                Ok((k.clone(), string(v, &child_path(path, k))?))
            })
            .collect(),
        other => Err(unexpected(path, "object", other)),
    }
}

fn filename(value: &RawValue, path: &str) -> Decoded<Filename> {
    match value {
        RawValue::String(s) => Ok(Filename::Path(s.clone())),
        RawValue::Function(Callable::Filename(f)) => Ok(Filename::Function(f.clone())),
        other => Err(unexpected(path, "string | filename function", other)),
    }
}

fn template_content(value: &RawValue, path: &str) -> Decoded<TemplateContent> {
    match value {
        RawValue::String(s) => Ok(TemplateContent::Literal(s.clone())),
        RawValue::Function(Callable::TemplateRender(f)) => Ok(TemplateContent::Render(f.clone())),
        other => Err(unexpected(path, "string | template render function", other)),
    }
}

fn template_parameters(value: &RawValue, path: &str) -> Decoded<TemplateParameters> {
    match value {
        RawValue::Bool(b) => Ok(TemplateParameters::Toggle(*b)),
        RawValue::Function(Callable::TemplateParams(f)) => {
            Ok(TemplateParameters::Transform(f.clone()))
        }
        other => string_map(other, path).map(TemplateParameters::Map),
    }
}

fn inject(value: &RawValue, path: &str) -> Decoded<Inject> {
    match value {
        RawValue::Bool(b) => Ok(Inject::Toggle(*b)),
        other => literal(other, path).map(Inject::Position),
    }
}

fn base(value: &RawValue, path: &str) -> Decoded<Base> {
    match value {
        RawValue::String(s) => Ok(Base::Href(s.clone())),
        RawValue::Object(map) => {
            let mut tag = BaseTag::default();
            if let Some(href) = map.get("href") {
                tag.href = Some(string(href, &child_path(path, "href"))?);
            }
            if let Some(target) = map.get("target") {
                tag.target = Some(literal(target, &child_path(path, "target"))?);
            }
            Ok(Base::Tag(tag))
        }
        other => Err(unexpected(path, "string | object", other)),
    }
}

fn meta(value: &RawValue, path: &str) -> Decoded<BTreeMap<String, MetaTag>> {
    match value {
        RawValue::Object(map) => map
            .iter()
            .map(|(name, tag)| -> Decoded<(String, MetaTag)> {
                let tag_path = child_path(path, name);
                let tag = match tag {
                    RawValue::String(content) => MetaTag::Content(content.clone()),
                    other => MetaTag::Attributes(string_map(other, &tag_path)?),
                };
                Ok((name.clone(), tag))
            })
            .collect(),
        other => Err(unexpected(path, "object", other)),
    }
}

/// Convert an object that already passed the options schema
///
/// Each arm mirrors one field of the options schema; a key the schema
/// declares but this match does not would silently land in `extra`.
pub(super) fn decode_options(map: &RawObject) -> Result<HtmlPluginOptions, ValidationError> {
    let mut options = HtmlPluginOptions::default();
    let mut issues = Vec::new();

    for (key, value) in map {
        let path = key.as_str();
        let decoded = match path {
            "title" => string(value, path).map(|v| options.title = Some(v)),
            "filename" => filename(value, path).map(|v| options.filename = Some(v)),
            "template" => string(value, path).map(|v| options.template = Some(v)),
            "templateContent" => {
                template_content(value, path).map(|v| options.template_content = Some(v))
            }
            "templateParameters" => {
                template_parameters(value, path).map(|v| options.template_parameters = Some(v))
            }
            "inject" => inject(value, path).map(|v| options.inject = Some(v)),
            "publicPath" => string(value, path).map(|v| options.public_path = Some(v)),
            "base" => base(value, path).map(|v| options.base = Some(v)),
            "scriptLoading" => literal(value, path).map(|v| options.script_loading = Some(v)),
            "chunks" => string_list(value, path).map(|v| options.chunks = Some(v)),
            "excludeChunks" => string_list(value, path).map(|v| options.exclude_chunks = Some(v)),
            "chunksSortMode" => literal(value, path).map(|v| options.chunks_sort_mode = Some(v)),
            "sri" => literal(value, path).map(|v| {
                warn!("the `sri` option is deprecated, use the subresource integrity plugin instead");
                options.sri = Some(v);
            }),
            "minify" => boolean(value, path).map(|v| options.minify = Some(v)),
            "favicon" => string(value, path).map(|v| options.favicon = Some(v)),
            "meta" => meta(value, path).map(|v| options.meta = Some(v)),
            "hash" => boolean(value, path).map(|v| options.hash = Some(v)),
            _ => {
                options.extra.insert(key.clone(), value.clone());
                Ok(())
            }
        };

        if let Err(issue) = decoded {
            issues.push(issue);
        }
    }

    if issues.is_empty() {
        Ok(options)
    } else {
        Err(ValidationError::new(issues))
    }
}
