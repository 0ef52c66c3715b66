//! Activity feed. Records who did what on which project, for the
//! dashboard feed, and notifies live subscribers of every insert.

use std::sync::LazyLock;

use tokio::sync::broadcast;
use tracing::warn;
use types::activity::{ActivityResp, ActivityType, ListActivitiesResp, QueryParams};

static CHANNEL: LazyLock<broadcast::Sender<ActivityResp>> =
    LazyLock::new(|| broadcast::channel(64).0);

/// Persists one activity row and fans it out to live subscribers.
/// Recording is best effort: a storage failure is logged, never
/// propagated to the caller.
pub async fn record(
    project_id: Option<&String>,
    typ: ActivityType,
    title: &str,
    info: Option<String>,
) {
    let id = common::get_id();
    let ts = common::timestamp_millis();
    if let Err(e) = storage::activity::insert(&id, project_id, typ, title, info.clone(), ts).await
    {
        warn!("record activity failed: {}", e);
        return;
    }

    // Only fails when nobody is listening.
    let _ = CHANNEL.send(ActivityResp {
        id,
        project_id: project_id.cloned(),
        r#type: typ,
        title: title.to_owned(),
        info,
        ts,
    });
}

/// Subscribes to activity inserts. Slow receivers miss messages past the
/// channel capacity rather than blocking writers.
pub fn subscribe() -> broadcast::Receiver<ActivityResp> {
    CHANNEL.subscribe()
}

pub async fn search(query: QueryParams) -> ListActivitiesResp {
    match storage::activity::search(&query).await {
        Ok(data) => ListActivitiesResp {
            total: data.len(),
            data,
        },
        Err(e) => {
            warn!("search activities failed: {}", e);
            ListActivitiesResp {
                total: 0,
                data: vec![],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_activities() {
        let mut rx = subscribe();
        CHANNEL
            .send(ActivityResp {
                id: "a1".to_owned(),
                project_id: None,
                r#type: ActivityType::ProjectCreated,
                title: "Projet créé".to_owned(),
                info: None,
                ts: 0,
            })
            .unwrap();

        let activity = rx.recv().await.unwrap();
        assert_eq!(activity.id, "a1");
        assert_eq!(activity.r#type, ActivityType::ProjectCreated);
    }
}
