use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JSON_MIME_TYPE: &str = "application/json";

/// One skill invocation and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub status: TaskStatus,
    pub artifacts: Vec<Artifact>,
}

impl Task {
    /// A finished task carrying `result` as its single data artifact.
    pub fn completed(id: String, result: Value) -> Self {
        Self {
            id,
            status: TaskStatus {
                state: TaskState::Completed,
            },
            artifacts: vec![Artifact {
                parts: vec![Part::data(result)],
            }],
        }
    }

    pub fn cancel(&mut self) {
        self.status.state = TaskState::Canceled;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
}

/// Skills run synchronously, so a task is never observed pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Completed,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub parts: Vec<Part>,
}

/// Artifact content. Results are always structured, so `data` is the only kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Part {
    Data {
        #[serde(default)]
        data: Value,
        #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
}

impl Part {
    pub fn data(data: Value) -> Self {
        Part::Data {
            data,
            mime_type: Some(JSON_MIME_TYPE.to_string()),
        }
    }
}

/// Caller message of a `tasks/send`.
///
/// Parts are kept raw: only `data` parts matter here, and an unfamiliar
/// part kind must not make the whole request unreadable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub parts: Vec<Value>,
}

impl Message {
    /// Payload of the first `data` part, or `{}` when there is none.
    pub fn data_payload(&self) -> Value {
        self.parts
            .iter()
            .find(|part| part.get("type").and_then(Value::as_str) == Some("data"))
            .map(|part| part.get("data").cloned().unwrap_or_else(empty_object))
            .unwrap_or_else(empty_object)
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// `tasks/send` params.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskSendParams {
    pub skill_id: String,
    pub message: Message,
}

/// `tasks/get` / `tasks/cancel` params.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskIdParams {
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completed_task_shape() {
        let task = Task::completed("t-1".to_string(), json!({ "success": true }));
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "t-1",
                "status": { "state": "completed" },
                "artifacts": [{
                    "parts": [{
                        "type": "data",
                        "data": { "success": true },
                        "mimeType": "application/json"
                    }]
                }]
            })
        );
    }

    #[test]
    fn test_cancel_sets_state() {
        let mut task = Task::completed("t-2".to_string(), json!({}));
        task.cancel();
        task.cancel();
        assert_eq!(task.status.state, TaskState::Canceled);
        assert_eq!(serde_json::to_value(&task.status).unwrap(), json!({ "state": "canceled" }));
    }

    #[test]
    fn test_send_params_first_data_part() {
        let params: TaskSendParams = serde_json::from_value(json!({
            "skillId": "search-hotels-live",
            "message": {
                "role": "user",
                "parts": [
                    { "type": "text", "text": "find me a hotel" },
                    { "type": "data", "data": { "destination": "Paris" } },
                    { "type": "data", "data": { "destination": "Rome" } }
                ]
            }
        }))
        .unwrap();
        assert_eq!(params.skill_id, "search-hotels-live");
        assert_eq!(params.message.data_payload(), json!({ "destination": "Paris" }));
    }

    #[test]
    fn test_send_params_without_data_part() {
        let params: TaskSendParams = serde_json::from_value(json!({
            "message": { "parts": [{ "type": "file", "uri": "x" }] }
        }))
        .unwrap();
        assert_eq!(params.skill_id, "");
        assert_eq!(params.message.data_payload(), json!({}));

        let empty: TaskSendParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.message.data_payload(), json!({}));
    }
}
