//! UseCase: セッション調停（Session Coordinator）
//!
//! 接続のライフサイクル（connect / disconnect）とルーム操作（create / join /
//! leave / rejoin / start_game / ping_room）を結び付ける状態機械です。
//!
//! 接続ごとの状態: `Anonymous → Bound(username, roomCode) → (Anonymous | 終了)`
//!
//! 各操作はルームテーブルの変更・レジストリのバインド変更・送信チャンネルへの
//! 投入までを 1 つの遷移ロックの内側で行います。これにより、メンバーシップと
//! バインディングが食い違う瞬間は外部から観測されず、各接続はルームのイベントを
//! 遷移が適用された順序で受け取ります。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 各操作の戻り値（Outbound）と、実際に各接続へ届いたイベント
//!
//! ### どのような状況を想定しているか
//! - 正常系：作成・参加・退出・再参加・ゲーム開始・ping
//! - 異常系：コード重複、存在しないルーム、重複ハンドル
//! - エッジケース：明示的な退出直後の切断、別ルームへの移動、同時作成

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    Command, ConnectionHandle, ConnectionRegistry, LeaveOutcome, MessagePusher, Notification,
    PusherChannel, Room, RoomCode, RoomRepository, Username,
};

use super::{
    broadcaster::EventBroadcaster,
    error::SessionError,
    outbound::Outbound,
};

const CONNECTION_SUCCESS_MESSAGE: &str = "Connected to server";

/// セッション調停のユースケース
pub struct SessionCoordinator {
    /// ルームテーブル
    repository: Arc<dyn RoomRepository>,
    /// 接続レジストリ
    registry: Arc<dyn ConnectionRegistry>,
    /// 送信
    broadcaster: EventBroadcaster,
    /// メンバーシップ遷移の直列化
    transition_lock: Mutex<()>,
}

impl SessionCoordinator {
    /// 新しい SessionCoordinator を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            broadcaster: EventBroadcaster::new(registry.clone(), message_pusher),
            repository,
            registry,
            transition_lock: Mutex::new(()),
        }
    }

    /// 接続を登録し、`connection_success` を送信する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Outbound>)` - 送信済みのイベント
    /// * `Err(SessionError::InvalidState)` - ハンドルが既に登録されている
    pub async fn connect(
        &self,
        handle: ConnectionHandle,
        sender: PusherChannel,
    ) -> Result<Vec<Outbound>, SessionError> {
        let _guard = self.transition_lock.lock().await;

        if let Err(e) = self.registry.register(handle).await {
            tracing::error!("Refusing connection '{}': {}", handle, e);
            return Err(e.into());
        }
        self.broadcaster
            .message_pusher()
            .register_client(handle, sender)
            .await;

        let outbounds = vec![Outbound::to_connection(
            handle,
            Notification::ConnectionSuccess {
                message: CONNECTION_SUCCESS_MESSAGE.to_string(),
            },
        )];
        self.broadcaster.deliver(&outbounds).await;

        tracing::info!("Connection '{}' established", handle);
        Ok(outbounds)
    }

    /// クライアントの操作を適用し、結果のイベントを送信する
    ///
    /// 想定内の失敗（コード重複・存在しないルーム）は呼び出し元への `error`
    /// イベントとして返し、`Err` にはしない。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Outbound>)` - 送信済みのイベント（空なら何も起きなかった）
    /// * `Err(SessionError::InvalidState)` - この接続を閉じるべき不整合
    pub async fn execute(
        &self,
        handle: ConnectionHandle,
        command: Command,
    ) -> Result<Vec<Outbound>, SessionError> {
        let _guard = self.transition_lock.lock().await;
        let name = command.name();

        let outbounds = match self.apply(handle, command).await {
            Ok(outbounds) => outbounds,
            Err(e) if e.is_fatal() => {
                tracing::error!("'{}' from connection '{}' failed: {}", name, handle, e);
                return Err(e);
            }
            Err(e) => {
                tracing::info!("'{}' from connection '{}' rejected: {:?}", name, handle, e);
                vec![Outbound::to_connection(
                    handle,
                    Notification::error(e.to_string()),
                )]
            }
        };

        self.broadcaster.deliver(&outbounds).await;
        Ok(outbounds)
    }

    /// 解釈できないメッセージを送ってきた接続に `error` を返す
    pub async fn reject(&self, handle: ConnectionHandle, message: impl Into<String>) {
        let _guard = self.transition_lock.lock().await;
        self.broadcaster
            .deliver(&[Outbound::to_connection(
                handle,
                Notification::error(message),
            )])
            .await;
    }

    /// 切断処理
    ///
    /// バインドされていれば暗黙の leave_room を行い、その後ハンドルを登録解除する。
    /// 明示的に退出済みの接続や、既に切断処理済みの接続に対しては何もしない。
    /// 同じ (username, roomCode) に別の接続がバインドされていれば（再接続後の
    /// 古い接続の切断）、メンバーシップはそのまま残す。
    pub async fn disconnect(&self, handle: ConnectionHandle) -> Vec<Outbound> {
        let _guard = self.transition_lock.lock().await;

        let outbounds = match self.registry.unbind(&handle).await {
            Some(binding) => {
                tracing::info!(
                    "Connection '{}' dropped while bound to ('{}', '{}')",
                    handle,
                    binding.username.as_str(),
                    binding.room_code.as_str()
                );
                self.release(binding.username, binding.room_code).await
            }
            None => vec![],
        };

        self.registry.unregister(&handle).await;
        self.broadcaster.deliver(&outbounds).await;
        self.broadcaster
            .message_pusher()
            .unregister_client(&handle)
            .await;

        tracing::info!("Connection '{}' closed", handle);
        outbounds
    }

    async fn apply(
        &self,
        handle: ConnectionHandle,
        command: Command,
    ) -> Result<Vec<Outbound>, SessionError> {
        // 未登録のハンドルではルームテーブルに触れない
        if !self.registry.contains(&handle).await {
            return Err(SessionError::InvalidState(format!(
                "Connection '{}' is not registered",
                handle
            )));
        }

        match command {
            Command::CreateRoom {
                code,
                title,
                creator,
                files,
            } => self.create_room(handle, code, title, creator, files).await,
            Command::JoinRoom { username, code } => self.join_room(handle, username, code).await,
            Command::LeaveRoom { username, code } => {
                Ok(self.leave_room(handle, username, code).await)
            }
            Command::RejoinRoom { username, code } => {
                self.rejoin_room(handle, username, code).await
            }
            Command::StartGame { code } => Ok(self.start_game(code)),
            Command::PingRoom { code } => Ok(self.ping_room(handle, code).await),
        }
    }

    async fn create_room(
        &self,
        handle: ConnectionHandle,
        code: RoomCode,
        title: String,
        creator: Username,
        files: Vec<String>,
    ) -> Result<Vec<Outbound>, SessionError> {
        let room = self
            .repository
            .create_room(code.clone(), title, creator.clone(), files)
            .await?;

        let mut outbounds = self.release_previous_binding(&handle, &creator, &code).await;
        self.registry.bind(&handle, creator.clone(), code).await?;

        outbounds.push(Outbound::to_connection(
            handle,
            Notification::RoomCreated {
                room_code: room.code.as_str().to_string(),
                creator: creator.into_string(),
                quiz_title: room.title.clone(),
                users: room.member_names(),
            },
        ));
        Ok(outbounds)
    }

    async fn join_room(
        &self,
        handle: ConnectionHandle,
        username: Username,
        code: RoomCode,
    ) -> Result<Vec<Outbound>, SessionError> {
        let (room, mut outbounds) = self.enter_room(handle, username.clone(), code).await?;
        tracing::info!("'{}' joined room '{}'", username.as_str(), room.code.as_str());

        outbounds.push(Outbound::to_room(
            room.code.clone(),
            Notification::UserJoined {
                username: username.into_string(),
                users: room.member_names(),
            },
        ));
        outbounds.push(Self::room_joined(handle, &room));
        Ok(outbounds)
    }

    async fn rejoin_room(
        &self,
        handle: ConnectionHandle,
        username: Username,
        code: RoomCode,
    ) -> Result<Vec<Outbound>, SessionError> {
        let (room, mut outbounds) = self
            .enter_room(handle, username.clone(), code)
            .await
            .map_err(|e| match e {
                SessionError::NotFound(code) => SessionError::NoLongerExists(code),
                other => other,
            })?;
        tracing::info!("'{}' resumed room '{}'", username.as_str(), room.code.as_str());

        // 再参加は他のメンバーに user_joined を通知しない
        outbounds.push(Self::room_joined(handle, &room));
        Ok(outbounds)
    }

    /// join / rejoin 共通: メンバーに追加し、ハンドルをバインドする
    async fn enter_room(
        &self,
        handle: ConnectionHandle,
        username: Username,
        code: RoomCode,
    ) -> Result<(Room, Vec<Outbound>), SessionError> {
        let room = self.repository.join_room(&code, username.clone()).await?;

        let outbounds = self.release_previous_binding(&handle, &username, &code).await;
        self.registry.bind(&handle, username, code).await?;

        Ok((room, outbounds))
    }

    async fn leave_room(
        &self,
        handle: ConnectionHandle,
        username: Username,
        code: RoomCode,
    ) -> Vec<Outbound> {
        let outbounds = self.leave(username.clone(), code.clone()).await;
        if outbounds.is_empty() {
            tracing::debug!(
                "Connection '{}' asked '{}' to leave '{}', not a member",
                handle,
                username.as_str(),
                code.as_str()
            );
            return outbounds;
        }

        // 退出したユーザーとしてバインドされている接続は全て匿名に戻す
        for bound in self.registry.handles_bound_as(&username, &code).await {
            self.registry.unbind(&bound).await;
        }
        outbounds
    }

    fn start_game(&self, code: RoomCode) -> Vec<Outbound> {
        // ルームの存在は確認しない（存在しなければ送信先が空になるだけ）
        tracing::info!("Game started in room '{}'", code.as_str());
        vec![Outbound::to_room(code, Notification::GameStarted)]
    }

    async fn ping_room(&self, handle: ConnectionHandle, code: RoomCode) -> Vec<Outbound> {
        if self.repository.get(&code).await.is_none() {
            tracing::debug!("Ping for absent room '{}' ignored", code.as_str());
            return vec![];
        }

        vec![Outbound::to_connection(
            handle,
            Notification::RoomActive {
                room_code: code.into_string(),
            },
        )]
    }

    /// ルームテーブルから退出させ、残りのメンバーへの user_left を組み立てる
    async fn leave(&self, username: Username, code: RoomCode) -> Vec<Outbound> {
        let users = match self.repository.leave_room(&code, &username).await {
            LeaveOutcome::NotMember => return vec![],
            LeaveOutcome::Left(room) => room.member_names(),
            LeaveOutcome::Closed => vec![],
        };
        tracing::info!("'{}' left room '{}'", username.as_str(), code.as_str());

        vec![Outbound::to_room(
            code,
            Notification::UserLeft {
                username: username.into_string(),
                users,
            },
        )]
    }

    /// 別のルーム（または別のユーザー名）にバインドされていれば、先に退出させる
    async fn release_previous_binding(
        &self,
        handle: &ConnectionHandle,
        next_username: &Username,
        next_code: &RoomCode,
    ) -> Vec<Outbound> {
        match self.registry.lookup(handle).await {
            Some(previous)
                if &previous.room_code != next_code || &previous.username != next_username =>
            {
                self.registry.unbind(handle).await;
                self.release(previous.username, previous.room_code).await
            }
            _ => vec![],
        }
    }

    /// 接続が (username, roomCode) を手放したときの暗黙の退出
    ///
    /// 同じ組にまだ別の接続がバインドされていれば、メンバーシップは残す。
    async fn release(&self, username: Username, code: RoomCode) -> Vec<Outbound> {
        if !self.registry.handles_bound_as(&username, &code).await.is_empty() {
            tracing::info!(
                "'{}' is still connected to room '{}', membership kept",
                username.as_str(),
                code.as_str()
            );
            return vec![];
        }

        self.leave(username, code).await
    }

    fn room_joined(handle: ConnectionHandle, room: &Room) -> Outbound {
        Outbound::to_connection(
            handle,
            Notification::RoomJoined {
                room_code: room.code.as_str().to_string(),
                quiz_title: room.title.clone(),
                users: room.member_names(),
                host: room.host.as_str().to_string(),
            },
        )
    }
}
