use anyhow::Context as _;
use chrono::Utc;
use lambda_runtime::{Context, Error, LambdaEvent, service_fn};
use serde_json::json;
use std::env;
use tracing::{info, warn};

use template_core::config::load_config;
use template_core::handler::Handler;
use template_core::telemetry::init_tracing;
use template_core::{InvocationContext, InvocationEvent, Response};

/// Path to a JSON event file used in local development mode.
const LOCAL_EVENT_PATH_ENV: &str = "LOCAL_EVENT_PATH";
/// Lambda's default function timeout.
const LOCAL_TIMEOUT_MS: u64 = 3_000;

pub async fn lambda_handler(
    handler: &Handler,
    event: LambdaEvent<InvocationEvent>,
) -> Result<Response, Error> {
    let context = invocation_context(&event.context);
    let response = handler.handle(&event.payload, &context)?;
    Ok(response)
}

fn invocation_context(ctx: &Context) -> InvocationContext {
    InvocationContext {
        function_name: ctx.env_config.function_name.clone(),
        function_version: ctx.env_config.version.clone(),
        invoked_function_arn: ctx.invoked_function_arn.clone(),
        memory_limit_in_mb: ctx.env_config.memory,
        aws_request_id: ctx.request_id.clone(),
        log_group_name: ctx.env_config.log_group.clone(),
        log_stream_name: ctx.env_config.log_stream.clone(),
        deadline_ms: ctx.deadline,
        xray_trace_id: ctx.xray_trace_id.clone(),
    }
}

fn local_context(now_ms: i64) -> InvocationContext {
    let function_name =
        env::var("AWS_LAMBDA_FUNCTION_NAME").unwrap_or_else(|_| "local-function".to_string());
    let now_ms = u64::try_from(now_ms).unwrap_or(0);

    InvocationContext {
        invoked_function_arn: format!("arn:aws:lambda:local:000000000000:function:{}", function_name),
        log_group_name: format!("/aws/lambda/{}", function_name),
        log_stream_name: "local".to_string(),
        function_name,
        function_version: "$LATEST".to_string(),
        memory_limit_in_mb: 128,
        aws_request_id: format!("local-{}", now_ms),
        deadline_ms: now_ms + LOCAL_TIMEOUT_MS,
        xray_trace_id: None,
    }
}

fn read_event(path: &str) -> anyhow::Result<InvocationEvent> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path))?;
    let event = serde_json::from_str(&content)
        .with_context(|| format!("Event file {} is not valid JSON", path))?;
    Ok(event)
}

/// Runs one invocation against an event file, or `{}` when none is given.
fn run_local(handler: &Handler, event_path: Option<&str>) -> anyhow::Result<Response> {
    let event = match event_path {
        Some(path) => read_event(path)?,
        None => InvocationEvent::new(json!({})),
    };
    let context = local_context(Utc::now().timestamp_millis());

    let response = handler.handle(&event, &context)?;
    info!("Response: {}", serde_json::to_string_pretty(&response)?);
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = load_config()?;
    info!(
        "Template values: project_name={}, runtime={}",
        config.project_name, config.runtime
    );
    if config.has_placeholders() {
        warn!("Template placeholders were never substituted; responses will greet them literally");
    }
    let handler = Handler::new(&config)?;

    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        info!("Running in AWS Lambda environment");
        lambda_runtime::run(service_fn(|event| lambda_handler(&handler, event))).await
    } else {
        info!("Running in local development mode");

        let event_path = env::var(LOCAL_EVENT_PATH_ENV).ok();
        run_local(&handler, event_path.as_deref())
            .map_err(|e| format!("Local invocation failed: {}", e))?;

        info!("Local invocation completed successfully");
        Ok(())
    }
}
