// ============================================================================
// REALTIME SERVICE - Canal de cambios de `demandas` (Phoenix sobre WebSocket)
// ============================================================================
// El canal vive mientras exista el `RealtimeChannel`; al hacer drop se envía
// phx_leave, se para el heartbeat y se cierra el socket.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::config::CONFIG;
use crate::error::{ApiError, ApiResult};
use crate::utils::constants::TABLE_DEMANDAS;

pub const EVENT_POSTGRES_CHANGES: &str = "postgres_changes";

pub fn topic_for(channel: &str) -> String {
    format!("realtime:{}", channel)
}

pub fn join_message(topic: &str, access_token: Option<&str>, msg_ref: u32) -> Value {
    json!({
        "topic": topic,
        "event": "phx_join",
        "payload": {
            "config": {
                "broadcast": { "self": false },
                "presence": { "key": "" },
                "postgres_changes": [
                    { "event": "*", "schema": "public", "table": TABLE_DEMANDAS }
                ]
            },
            "access_token": access_token,
        },
        "ref": msg_ref.to_string(),
    })
}

pub fn heartbeat_message(msg_ref: u32) -> Value {
    json!({
        "topic": "phoenix",
        "event": "heartbeat",
        "payload": {},
        "ref": msg_ref.to_string(),
    })
}

pub fn leave_message(topic: &str, msg_ref: u32) -> Value {
    json!({
        "topic": topic,
        "event": "phx_leave",
        "payload": {},
        "ref": msg_ref.to_string(),
    })
}

/// Mensaje entrante de cambio en la tabla para nuestro topic
pub fn is_change_event(raw: &str, topic: &str) -> bool {
    let Ok(message) = serde_json::from_str::<Value>(raw) else {
        return false;
    };
    message.get("topic").and_then(Value::as_str) == Some(topic)
        && message.get("event").and_then(Value::as_str) == Some(EVENT_POSTGRES_CHANGES)
}

/// Respuesta de error del servidor a nuestro join
pub fn join_error(raw: &str, topic: &str) -> Option<String> {
    let message: Value = serde_json::from_str(raw).ok()?;
    if message.get("topic").and_then(Value::as_str) != Some(topic)
        || message.get("event").and_then(Value::as_str) != Some("phx_reply")
    {
        return None;
    }
    let payload = message.get("payload")?;
    if payload.get("status").and_then(Value::as_str) == Some("error") {
        Some(payload.get("response").map(|r| r.to_string()).unwrap_or_default())
    } else {
        None
    }
}

/// Suscripción activa al canal
pub struct RealtimeChannel {
    socket: WebSocket,
    topic: String,
    next_ref: Rc<Cell<u32>>,
    _heartbeat: Interval,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

fn send(socket: &WebSocket, message: &Value) {
    if socket.ready_state() != WebSocket::OPEN {
        return;
    }
    if let Err(e) = socket.send_with_str(&message.to_string()) {
        log::warn!("⚠️ [REALTIME] Error enviando mensaje: {:?}", e);
    }
}

fn take_ref(counter: &Cell<u32>) -> u32 {
    let value = counter.get() + 1;
    counter.set(value);
    value
}

impl RealtimeChannel {
    /// Abrir socket, unirse al topic y llamar `on_change` por cada cambio.
    /// `on_closed` corre (fuera del handler) si el servidor cierra el socket.
    pub fn subscribe(
        access_token: Option<String>,
        on_change: Rc<dyn Fn()>,
        on_closed: Rc<dyn Fn()>,
    ) -> ApiResult<Self> {
        let topic = topic_for(&CONFIG.demanda_config.realtime_channel);
        let socket = WebSocket::new(&CONFIG.realtime_url()).map_err(ApiError::from)?;
        let next_ref = Rc::new(Cell::new(0u32));

        let on_open = Closure::wrap(Box::new({
            let socket = socket.clone();
            let topic = topic.clone();
            let next_ref = next_ref.clone();
            move |_event: Event| {
                log::info!("🔌 [REALTIME] Conectado, uniéndose a {}", topic);
                send(&socket, &join_message(&topic, access_token.as_deref(), take_ref(&next_ref)));
            }
        }) as Box<dyn FnMut(Event)>);

        let on_message = Closure::wrap(Box::new({
            let topic = topic.clone();
            move |event: MessageEvent| {
                let Some(raw) = event.data().as_string() else {
                    return;
                };
                if is_change_event(&raw, &topic) {
                    log::info!("🔄 [REALTIME] Cambio en demandas");
                    on_change();
                } else if let Some(reason) = join_error(&raw, &topic) {
                    log::error!("❌ [REALTIME] Join rechazado: {}", reason);
                }
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        // El dueño suelta el canal desde un Timeout: no se puede destruir este closure mientras corre
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            log::warn!("⚠️ [REALTIME] Socket cerrado por el servidor (código {})", event.code());
            let on_closed = on_closed.clone();
            Timeout::new(0, move || on_closed()).forget();
        }) as Box<dyn FnMut(CloseEvent)>);

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let heartbeat = Interval::new(CONFIG.timer_config.heartbeat_interval_ms, {
            let socket = socket.clone();
            let next_ref = next_ref.clone();
            move || send(&socket, &heartbeat_message(take_ref(&next_ref)))
        });

        Ok(Self {
            socket,
            topic,
            next_ref,
            _heartbeat: heartbeat,
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Drop for RealtimeChannel {
    fn drop(&mut self) {
        send(&self.socket, &leave_message(&self.topic, take_ref(&self.next_ref)));
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        let _ = self.socket.close();
        log::info!("🔌 [REALTIME] Canal {} cerrado", self.topic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_message_subscribes_to_demandas() {
        let msg = join_message("realtime:user-tasks-channel", Some("jwt"), 1);
        assert_eq!(msg["event"], "phx_join");
        assert_eq!(msg["ref"], "1");
        assert_eq!(msg["payload"]["access_token"], "jwt");
        let change = &msg["payload"]["config"]["postgres_changes"][0];
        assert_eq!(change["event"], "*");
        assert_eq!(change["schema"], "public");
        assert_eq!(change["table"], "demandas");
    }

    #[test]
    fn test_heartbeat_and_leave() {
        assert_eq!(heartbeat_message(7)["topic"], "phoenix");
        let leave = leave_message("realtime:x", 8);
        assert_eq!(leave["event"], "phx_leave");
        assert_eq!(leave["topic"], "realtime:x");
    }

    #[test]
    fn test_change_detection_is_topic_scoped() {
        let topic = "realtime:user-tasks-channel";
        let change = r#"{"topic":"realtime:user-tasks-channel","event":"postgres_changes","payload":{"data":{"type":"UPDATE"}},"ref":null}"#;
        assert!(is_change_event(change, topic));
        assert!(!is_change_event(change, "realtime:other"));
        let reply = r#"{"topic":"realtime:user-tasks-channel","event":"phx_reply","payload":{"status":"ok","response":{}},"ref":"1"}"#;
        assert!(!is_change_event(reply, topic));
        assert!(join_error(reply, topic).is_none());
        let rejected = r#"{"topic":"realtime:user-tasks-channel","event":"phx_reply","payload":{"status":"error","response":{"reason":"unauthorized"}},"ref":"1"}"#;
        assert_eq!(join_error(rejected, topic).unwrap(), r#"{"reason":"unauthorized"}"#);
        assert!(!is_change_event("not json", topic));
    }
}
