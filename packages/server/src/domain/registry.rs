//! RoomRegistry trait 定義
//!
//! どの接続がどのプロジェクトルームに在室しているかを管理するプレゼンス索引。
//! 認可のキャッシュではない（認可は毎回ストアから導出する）。

use async_trait::async_trait;

use super::{ConnectionId, ProjectId, RoomPresence};

/// Room Registry trait
///
/// ルームは在室者集合から導出されるビューとして扱う。
/// 1 人以上在室している間だけ存在し、明示的な作成・削除は行わない。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 接続をルームに追加（冪等）
    ///
    /// 新たに追加された場合は `true`、既に在室していた場合は `false` を返す。
    async fn join(&self, connection_id: ConnectionId, project_id: ProjectId) -> bool;

    /// 接続を全てのルームから削除し、退室したルームを返す
    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<ProjectId>;

    /// 呼び出し時点のルーム在室者のスナップショット
    async fn members_of(&self, project_id: &ProjectId) -> Vec<ConnectionId>;

    /// 接続が在室しているルーム
    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<ProjectId>;

    /// 在室者のいるルームの一覧（プロジェクト ID 順）
    async fn active_rooms(&self) -> Vec<RoomPresence>;
}
