// ABOUTME: Built-in Handlebars helper functions available to every render
// ABOUTME: Covers environment lookup, string casing, base64, timestamps, and identifiers

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use std::env;
use uuid::Uuid;

/// Environment variable helper - reads a process environment variable,
/// falling back to an optional default
pub fn env_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let var_name = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("env helper requires a variable name parameter"))?;

    let fallback = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

    let value = env::var(var_name).unwrap_or_else(|_| fallback.to_string());
    out.write(&value)?;
    Ok(())
}

/// Default helper - substitutes a fallback when the value is empty
pub fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");

    let fallback = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("default helper requires a fallback parameter"))?;

    let result = if value.is_empty() { fallback } else { value };
    out.write(result)?;
    Ok(())
}

/// Uppercase helper
pub fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("upper helper requires an input parameter"))?;

    out.write(&input.to_uppercase())?;
    Ok(())
}

/// Lowercase helper
pub fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("lower helper requires an input parameter"))?;

    out.write(&input.to_lowercase())?;
    Ok(())
}

/// Base64 encode helper
pub fn base64_encode_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("base64_encode helper requires an input parameter"))?;

    out.write(&BASE64.encode(input.as_bytes()))?;
    Ok(())
}

/// Base64 decode helper
pub fn base64_decode_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("base64_decode helper requires an input parameter"))?;

    let decoded = BASE64
        .decode(input)
        .map_err(|e| RenderError::new(format!("base64 decode error: {}", e)))?;

    let text = String::from_utf8(decoded)
        .map_err(|e| RenderError::new(format!("utf-8 decode error: {}", e)))?;

    out.write(&text)?;
    Ok(())
}

/// Timestamp helper - formats the current UTC time, default `%Y-%m-%d %H:%M:%S`
pub fn timestamp_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let format = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .unwrap_or("%Y-%m-%d %H:%M:%S");

    out.write(&Utc::now().format(format).to_string())?;
    Ok(())
}

/// UUID helper - generates a fresh v4 identifier
pub fn uuid_helper(
    _h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    out.write(&Uuid::new_v4().to_string())?;
    Ok(())
}

/// Register the built-in helper set with a Handlebars registry
pub fn register_builtins(registry: &mut Handlebars) {
    registry.register_helper("env", Box::new(env_helper));
    registry.register_helper("default", Box::new(default_helper));
    registry.register_helper("upper", Box::new(upper_helper));
    registry.register_helper("lower", Box::new(lower_helper));
    registry.register_helper("base64_encode", Box::new(base64_encode_helper));
    registry.register_helper("base64_decode", Box::new(base64_decode_helper));
    registry.register_helper("timestamp", Box::new(timestamp_helper));
    registry.register_helper("uuid", Box::new(uuid_helper));
}
