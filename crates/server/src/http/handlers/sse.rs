use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use domain::PipelineEvent;
use futures::stream::Stream;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

use crate::state::AppState;

/// 实时部署推送：仪表盘订阅某个项目，每条新部署记录推一个 `deployment` 事件。
pub async fn sse_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.tx_events.subscribe();
    tracing::info!("SSE Connected: project={}", name);

    let stream = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(PipelineEvent::DeploymentRecorded {
            project_name,
            deployment,
        }) => {
            // 与解析策略一致：项目名大小写不敏感
            if project_name.eq_ignore_ascii_case(&name) {
                Some(
                    Event::default()
                        .event("deployment")
                        .json_data(deployment)
                        .map_err(|e| {
                            tracing::error!("SSE serialization error: {}", e);
                            axum::Error::new(e)
                        }),
                )
            } else {
                None
            }
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(std::time::Duration::from_secs(15)))
}
