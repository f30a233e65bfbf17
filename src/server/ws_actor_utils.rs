use actix_web_actors::ws;
use serde_json::Value;
use actix::ActorContext;

use crate::server::ws_error::ws_error_message;
use crate::server::anti_spam::AntiSpamState;

/// Shared behaviour for WebSocket actors guarded by an `AntiSpamState`.
pub trait WsActorUtils {
    fn anti_spam(&mut self) -> &mut AntiSpamState;
    fn connection_label(&self) -> String;

    /// Called once when the connection gets banned, before the notice is sent.
    fn on_banned(&mut self) {}

    /// Send a ban notice, close the socket and stop the actor.
    fn send_ban_and_close<A>(&mut self, ctx: &mut ws::WebsocketContext<A>)
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        self.on_banned();
        let context = serde_json::json!({
            "connection": self.connection_label(),
            "ban_remaining_secs": self.anti_spam().ban_remaining_secs(),
        });
        ctx.text(ws_error_message(
            "BANNED",
            "You have been banned for flooding the maze. Please try again later.",
            Some(context),
        ));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Banned for spam".into()),
        }));
        ctx.stop();
    }

    /// Count an incoming message; closes the connection and returns true when it floods.
    fn check_flood<A>(&mut self, ctx: &mut ws::WebsocketContext<A>) -> bool
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let label = self.connection_label();
        if self.anti_spam().record_request(&label) {
            self.send_ban_and_close(ctx);
            return true;
        }
        false
    }

    /// Send an error unless it repeats the previous one, banning on too many errors.
    fn send_error_and_maybe_ban<A>(
        &mut self,
        ctx: &mut ws::WebsocketContext<A>,
        code: &str,
        message: &str,
        context: Option<Value>,
    )
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let label = self.connection_label();
        if !self.anti_spam().should_send_error(code, &label) {
            return;
        }
        if self.anti_spam().record_response(&label) {
            self.send_ban_and_close(ctx);
            return;
        }
        ctx.text(ws_error_message(code, message, context));
    }
}
