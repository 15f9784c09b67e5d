use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::boot::BootCompleted;
use crate::engine::carousel::{CarouselState, NavigationEvent, ProjectChanged};
use crate::engine::core::app_state::AppState;
use crate::engine::registry::ProjectRegistry;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{window, MessageEvent};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn not_ready(message: &str) -> Self {
        Self {
            code: -32001,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC communication with the host page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
    /// Last project index reported to the host. Placeholder upgrades
    /// re-announce the same index; the host only hears real changes.
    last_reported_index: Option<usize>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the RPC layer for iframe-based deployment. The
/// host page can drive navigation and query the current project; the
/// engine reports boot completion and project changes back.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_boot_complete,
                    notify_project_changed,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap RPC-format check before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping the thread-safe message queue for wasm event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    state: Res<State<AppState>>,
    carousel: Res<CarouselState>,
    registry: Res<ProjectRegistry>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut navigation: EventWriter<NavigationEvent>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) =
                    handle_rpc_request(&request, state.get(), &carousel, &registry, &mut navigation)
                {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {parse_error}");
            }
        }
    }
}

/// Handle an individual RPC request and generate a response by method.
fn handle_rpc_request(
    request: &RpcRequest,
    state: &AppState,
    carousel: &CarouselState,
    registry: &ProjectRegistry,
    navigation: &mut EventWriter<NavigationEvent>,
) -> Option<RpcResponse> {
    // Only requests with IDs get responses; notifications have none.
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "next_project" => queue_navigation(state, navigation, NavigationEvent::Next),
        "previous_project" => queue_navigation(state, navigation, NavigationEvent::Previous),
        "select_project" => handle_select_project(&request.params, state, registry, navigation),
        "get_current_project" => handle_get_current_project(carousel, registry),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// The carousel only consumes navigation events in `MainContent`;
/// requests queued earlier would expire unobserved, so they are
/// rejected instead of acknowledged.
fn navigation_ready(state: &AppState) -> Result<(), RpcError> {
    if *state == AppState::MainContent {
        Ok(())
    } else {
        Err(RpcError::not_ready(
            "Navigation is unavailable until main content is shown",
        ))
    }
}

fn queue_navigation(
    state: &AppState,
    navigation: &mut EventWriter<NavigationEvent>,
    event: NavigationEvent,
) -> Result<serde_json::Value, RpcError> {
    navigation_ready(state)?;
    navigation.write(event);
    Ok(serde_json::json!({ "success": true }))
}

fn handle_select_project(
    params: &serde_json::Value,
    state: &AppState,
    registry: &ProjectRegistry,
    navigation: &mut EventWriter<NavigationEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct SelectProjectParams {
        index: usize,
    }

    navigation_ready(state)?;
    let select = serde_json::from_value::<SelectProjectParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'index' parameter"))?;

    if select.index >= registry.len() {
        return Err(RpcError::invalid_params(&format!(
            "Project index {} out of range",
            select.index
        )));
    }

    navigation.write(NavigationEvent::Select(select.index));
    Ok(serde_json::json!({ "success": true, "index": select.index }))
}

fn handle_get_current_project(
    carousel: &CarouselState,
    registry: &ProjectRegistry,
) -> Result<serde_json::Value, RpcError> {
    let index = carousel.current_index();
    let record = registry.get(index);
    Ok(serde_json::json!({
        "index": index,
        "project": record,
    }))
}

fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Tell the host the terminal intro has finished.
fn notify_boot_complete(
    mut completed: EventReader<BootCompleted>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if completed.read().next().is_some() {
        rpc_interface.send_notification("boot_complete", serde_json::json!({}));
    }
}

fn notify_project_changed(
    mut changed: EventReader<ProjectChanged>,
    registry: Res<ProjectRegistry>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(event) = changed.read().last().copied() else {
        return;
    };
    if rpc_interface.last_reported_index == Some(event.index) {
        return;
    }
    rpc_interface.last_reported_index = Some(event.index);
    let record = registry.get(event.index);
    rpc_interface.send_notification(
        "project_changed",
        serde_json::json!({
            "index": event.index,
            "title": record.title,
        }),
    );
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send a serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_with_params() {
        let raw = r#"{"jsonrpc":"2.0","method":"select_project","params":{"index":1},"id":7}"#;
        let request: RpcRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.method, "select_project");
        assert_eq!(request.params["index"], 1);
        assert_eq!(request.id, Some(serde_json::json!(7)));
    }

    #[test]
    fn parses_request_without_params() {
        let raw = r#"{"jsonrpc":"2.0","method":"next_project","id":1}"#;
        let request: RpcRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.method, "next_project");
        assert!(request.params.is_null());
    }

    #[test]
    fn notifications_carry_no_id() {
        let raw = r#"{"jsonrpc":"2.0","method":"next_project","params":{}}"#;
        let request: RpcRequest = serde_json::from_str(raw).unwrap();
        assert!(request.id.is_none());
    }

    #[test]
    fn navigation_rejected_outside_main_content() {
        assert!(navigation_ready(&AppState::Booting).is_err());
        assert!(navigation_ready(&AppState::TransitioningOut).is_err());
        assert!(navigation_ready(&AppState::MainContent).is_ok());

        let error = navigation_ready(&AppState::Booting).unwrap_err();
        assert_eq!(error.code, -32001);
    }

    #[test]
    fn error_response_serializes_code_and_message() {
        let error = RpcError::invalid_params("Expected 'index' parameter");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], -32602);
        assert_eq!(json["message"], "Expected 'index' parameter");
    }

    #[test]
    fn notification_interface_queues_in_order() {
        let mut interface = WebRpcInterface::default();
        interface.send_notification("boot_complete", serde_json::json!({}));
        interface.send_notification("project_changed", serde_json::json!({"index": 1}));
        assert_eq!(interface.outgoing_notifications.len(), 2);
        assert_eq!(interface.outgoing_notifications[0].method, "boot_complete");
        assert_eq!(interface.outgoing_notifications[1].method, "project_changed");
    }
}
