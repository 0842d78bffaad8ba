pub mod get;
pub mod list;
pub mod query;
pub mod seed;

use std::path::Path;

use ecohub_core::errors::{EcoHubError, ExError};
use ecohub_core::Record;
use ecohub_core_types::RequestContext;
use ecohub_store::seed::import_seed;
use ecohub_store::EntityHub;
use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Attach the request's correlation ids to an error
pub fn in_context(err: ExError, ctx: &RequestContext) -> ExError {
    let err = err.with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}

/// Import `seed` into a fresh hub
pub fn load_hub(seed: &Path, ctx: &RequestContext) -> Result<EntityHub, ExError> {
    import_seed(seed)
        .map(|(_report, hub)| hub)
        .map_err(|e| in_context(e, ctx))
}

/// Pretty JSON for stdout
pub fn render_json<T>(value: &T, ctx: &RequestContext) -> Result<String, ExError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string_pretty(value).map_err(|e| {
        let err = ExError::from(EcoHubError::from(e)).with_op("render_json");
        in_context(err, ctx)
    })
}

pub fn print_records(records: &[Record], ctx: &RequestContext) -> CommandResult {
    println!("{}", render_json(records, ctx)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecohub_core::ExErrorKind;
    use serde::ser::Error as _;
    use serde::Serializer;

    struct Unrenderable;

    impl Serialize for Unrenderable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("value cannot be rendered"))
        }
    }

    #[test]
    fn test_render_failure_is_serialization_error() {
        let ctx = RequestContext::new();
        let err = render_json(&Unrenderable, &ctx).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.op(), Some("render_json"));
        assert_eq!(err.request_id(), Some(&ctx.request_id));
        assert!(err.message().contains("value cannot be rendered"));
    }

    #[test]
    fn test_render_records() {
        let ctx = RequestContext::new();
        let rendered = render_json(&serde_json::json!([{"id": 1}]), &ctx).unwrap();
        assert!(rendered.contains("\"id\": 1"));
    }
}
