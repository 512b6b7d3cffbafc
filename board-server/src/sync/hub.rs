//! Change hub: broadcast channels behind the realtime feeds

use shared::message::SyncMessage;
use tokio::sync::broadcast;

/// Scope value for collections without a parent (the boards root)
pub const ROOT_SCOPE: &str = "root";

/// Default capacity of the broadcast channels
const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Entity kinds of the board hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Board,
    List,
    Task,
}

/// A committed mutation somewhere in the watched hierarchy
///
/// `scope` identifies the watched collection: the parent record id
/// ("board:x" for its lists, "list:y" for its tasks) or [`ROOT_SCOPE`]
/// for the boards collection itself.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: EntityKind,
    pub scope: String,
}

/// 变更通知与同步广播中心
///
/// 两条独立通道：
/// - `change_tx`: 进程内 feed 唤醒信号 (ChangeEvent)
/// - `sync_tx`: 面向客户端的带版本号同步消息 (SyncMessage)
#[derive(Debug, Clone)]
pub struct ChangeHub {
    change_tx: broadcast::Sender<ChangeEvent>,
    sync_tx: broadcast::Sender<SyncMessage>,
}

impl ChangeHub {
    /// 创建默认容量的变更中心
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// 创建指定容量的变更中心
    pub fn with_capacity(capacity: usize) -> Self {
        let (change_tx, _) = broadcast::channel(capacity);
        let (sync_tx, _) = broadcast::channel(capacity);
        Self { change_tx, sync_tx }
    }

    /// Announce a committed mutation in the given scope
    ///
    /// No subscribers is a normal state (nothing watches yet), so send
    /// errors are ignored.
    pub fn notify(&self, kind: EntityKind, scope: impl Into<String>) {
        let _ = self.change_tx.send(ChangeEvent {
            kind,
            scope: scope.into(),
        });
    }

    /// Subscribe to raw change events (used by feeds)
    pub fn subscribe_changes(&self) -> broadcast::Receiver<ChangeEvent> {
        self.change_tx.subscribe()
    }

    /// Publish a versioned sync message for out-of-process clients
    pub fn publish_sync(&self, msg: SyncMessage) {
        let _ = self.sync_tx.send(msg);
    }

    /// Subscribe to the client-facing sync stream
    pub fn subscribe_sync(&self) -> broadcast::Receiver<SyncMessage> {
        self.sync_tx.subscribe()
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notify_reaches_subscribers() {
        let hub = ChangeHub::new();
        let mut rx = hub.subscribe_changes();
        hub.notify(EntityKind::Task, "list:a");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, EntityKind::Task);
        assert_eq!(event.scope, "list:a");
    }

    #[test]
    fn notify_without_subscribers_is_silent() {
        let hub = ChangeHub::new();
        // Must not panic or error
        hub.notify(EntityKind::Board, ROOT_SCOPE);
    }
}
