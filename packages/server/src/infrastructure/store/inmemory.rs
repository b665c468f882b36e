//! InMemory Project Store 実装
//!
//! ドメイン層が定義する ProjectStore trait の具体的な実装。
//! プロジェクト（メンバー一覧と埋め込みのチャット履歴を持つドキュメント）とユーザーを
//! HashMap に保持します。全ての操作は 1 つの Mutex の中で完結するため、
//! 単一ドキュメントの read-modify-write はアトミックになります。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use campus_chat_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, MessageContent, MessageId, ProjectId, ProjectRef, ProjectStore, StoreError,
    Timestamp, UserId, UserSummary,
};

use super::fixture::{FixtureError, StoreFixture};

/// プロジェクトのドキュメント
#[derive(Debug, Clone)]
pub struct ProjectDocument {
    pub id: ProjectId,
    pub title: String,
    pub owner: UserId,
    pub members: Vec<UserId>,
    pub chat_messages: Vec<ChatMessage>,
}

impl ProjectDocument {
    pub fn new(
        id: ProjectId,
        title: impl Into<String>,
        owner: UserId,
        members: Vec<UserId>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            owner,
            members,
            chat_messages: Vec::new(),
        }
    }

    /// オーナーは常にメンバーとして扱う
    pub fn has_member(&self, user_id: &UserId) -> bool {
        &self.owner == user_id || self.members.contains(user_id)
    }
}

#[derive(Default)]
struct StoreState {
    projects: HashMap<ProjectId, ProjectDocument>,
    users: HashMap<UserId, UserSummary>,
}

/// インメモリ Project Store 実装
pub struct InMemoryProjectStore {
    state: Mutex<StoreState>,
    /// メッセージの作成時刻を払い出す時計
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProjectStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 時計を指定して空のストアを作成
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    /// フィクスチャから初期データを投入したストアを作成
    pub fn from_fixture(fixture: StoreFixture, clock: Arc<dyn Clock>) -> Result<Self, FixtureError> {
        let mut state = StoreState::default();

        for user in fixture.users {
            let id = UserId::try_from(user.id)?;
            state
                .users
                .insert(id.clone(), UserSummary::new(id, user.username, user.email));
        }

        for project in fixture.projects {
            let members = project
                .members
                .into_iter()
                .map(UserId::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            let document = ProjectDocument::new(
                ProjectId::try_from(project.id)?,
                project.title,
                UserId::try_from(project.owner)?,
                members,
            );
            state.projects.insert(document.id.clone(), document);
        }

        tracing::info!(
            "Seeded project store with {} users and {} projects",
            state.users.len(),
            state.projects.len()
        );

        Ok(Self {
            state: Mutex::new(state),
            clock,
        })
    }

    /// ユーザーを追加（同じ ID は上書き）
    pub async fn insert_user(&self, user: UserSummary) {
        let mut state = self.state.lock().await;
        state.users.insert(user.id.clone(), user);
    }

    /// プロジェクトを追加（同じ ID は上書き）
    pub async fn insert_project(&self, project: ProjectDocument) {
        let mut state = self.state.lock().await;
        state.projects.insert(project.id.clone(), project);
    }

    /// プロジェクトを削除（埋め込みのチャット履歴も一緒に消える）
    pub async fn remove_project(&self, project_id: &ProjectId) -> bool {
        let mut state = self.state.lock().await;
        state.projects.remove(project_id).is_some()
    }

    /// メンバー一覧からユーザーを外す
    pub async fn remove_member(&self, project_id: &ProjectId, user_id: &UserId) -> bool {
        let mut state = self.state.lock().await;
        let Some(project) = state.projects.get_mut(project_id) else {
            return false;
        };
        let before = project.members.len();
        project.members.retain(|member| member != user_id);
        before != project.members.len()
    }

    /// プロジェクトのチャット履歴（保存順）
    pub async fn messages_of(&self, project_id: &ProjectId) -> Vec<ChatMessage> {
        let state = self.state.lock().await;
        state
            .projects
            .get(project_id)
            .map(|project| project.chat_messages.clone())
            .unwrap_or_default()
    }

    /// 登録されているプロジェクト数
    #[cfg(test)]
    pub async fn project_count(&self) -> usize {
        self.state.lock().await.projects.len()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn find_project_if_member(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<Option<ProjectRef>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .projects
            .get(project_id)
            .filter(|project| project.has_member(user_id))
            .map(|project| ProjectRef {
                id: project.id.clone(),
                title: project.title.clone(),
            }))
    }

    async fn append_chat_message(
        &self,
        project_id: &ProjectId,
        sender_id: &UserId,
        content: &MessageContent,
    ) -> Result<ChatMessage, StoreError> {
        let mut state = self.state.lock().await;
        let project = state
            .projects
            .get_mut(project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))?;

        let message = ChatMessage {
            id: MessageId::generate(),
            project_id: project_id.clone(),
            sender: sender_id.clone(),
            content: content.clone(),
            created_at: Timestamp::new(self.clock.now_millis()),
        };
        project.chat_messages.push(message.clone());

        Ok(message)
    }

    async fn find_user_display_info(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserSummary>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.users.get(user_id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
