//! The favorite widget on each item card as a state machine.
//!
//! [FavoriteWidget::apply] and [FavoriteWidget::complete] are pure: they
//! decide the next state and which remote call, if any, must be made.
//! [run] drives them against a [FavoriteApi], making at most one remote call
//! per transition. State only changes after the remote call succeeds.

use crate::{
    ApiError, Error,
    auth::Session,
    favorite::{FavoriteApi, FavoriteFolder, FolderId, FolderName},
    item::ItemId,
};

/// The folder picker, open while the user chooses where to put an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPicker {
    /// The user's folders, in the order the API returned them.
    pub folders: Vec<FavoriteFolder>,
    /// The existing folder the user has selected.
    pub selected_folder: Option<FolderId>,
    /// The text in the new folder input.
    pub new_folder_name: String,
}

/// Where the item stands with respect to the user's favorites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The item is not a favorite.
    Unfavorited,
    /// The folder picker is open.
    PickingFolder(FolderPicker),
    /// The item is a favorite.
    Favorited {
        /// The folder the item was last known to be in, `None` if the status
        /// came from the check endpoint alone.
        ///
        /// Unfavoriting with `None` sends a null folder, which the API accepts
        /// without removing anything. The widget still shows the item as not
        /// a favorite until the next mount re-checks it.
        folder_id: Option<FolderId>,
    },
}

/// The favorite widget of a single item card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteWidget {
    /// The item the widget belongs to.
    pub item_id: ItemId,
    /// The current state of the widget.
    pub status: Status,
}

/// Something the user did to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The heart button was clicked.
    Toggle,
    /// A folder in the picker was clicked.
    SelectFolder(FolderId),
    /// The picker was submitted.
    Submit,
    /// The picker was closed.
    Close,
}

/// A remote call requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET /favorite`
    LoadFolders,
    /// `POST /favorite`
    AddToFolder(FolderId),
    /// `POST /favorite/new`
    CreateFolder(FolderName),
    /// `POST /favorite/delete`
    RemoveFromFolder(Option<FolderId>),
}

/// The successful result of a [Command].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user's folders were fetched.
    FoldersLoaded(Vec<FavoriteFolder>),
    /// The call succeeded and returned nothing of interest.
    Done,
}

/// Feedback for the user produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A remote call succeeded.
    Success(String),
    /// A remote call failed.
    Failure {
        /// What the widget was trying to do.
        message: String,
        /// Why it failed.
        details: String,
    },
    /// The picker input was rejected without making a remote call.
    Invalid(String),
}

/// The result of a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The widget after the transition.
    pub widget: FavoriteWidget,
    /// The remote call to make next, if any.
    pub command: Option<Command>,
    /// Feedback to show the user.
    pub notice: Option<Notice>,
}

impl Step {
    fn stay(widget: FavoriteWidget) -> Self {
        Self {
            widget,
            command: None,
            notice: None,
        }
    }

    fn call(widget: FavoriteWidget, command: Command) -> Self {
        Self {
            widget,
            command: Some(command),
            notice: None,
        }
    }

    fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

impl FavoriteWidget {
    /// Create a widget for `item_id` in the state `status`.
    pub fn new(item_id: ItemId, status: Status) -> Self {
        Self { item_id, status }
    }

    /// Decide what happens when the user does `event`.
    pub fn apply(self, event: Event) -> Step {
        let item_id = self.item_id;

        match (self.status, event) {
            (Status::Unfavorited, Event::Toggle) => {
                Step::call(Self::new(item_id, Status::Unfavorited), Command::LoadFolders)
            }
            (Status::Favorited { folder_id }, Event::Toggle) => Step::call(
                Self::new(item_id, Status::Favorited { folder_id }),
                Command::RemoveFromFolder(folder_id),
            ),
            (Status::PickingFolder(_), Event::Toggle | Event::Close) => {
                Step::stay(Self::new(item_id, Status::Unfavorited))
            }
            (Status::PickingFolder(mut picker), Event::SelectFolder(folder_id)) => {
                let is_known = picker.folders.iter().any(|folder| folder.id == folder_id);

                if picker.selected_folder == Some(folder_id) {
                    picker.selected_folder = None;
                } else if is_known {
                    picker.selected_folder = Some(folder_id);
                }

                Step::stay(Self::new(item_id, Status::PickingFolder(picker)))
            }
            (Status::PickingFolder(picker), Event::Submit) => submit(item_id, picker),
            (status, _) => Step::stay(Self::new(item_id, status)),
        }
    }

    /// Decide what happens once the remote call `command` has finished.
    ///
    /// `result` holds the error message on failure.
    pub fn complete(self, command: Command, result: Result<Outcome, String>) -> Step {
        let item_id = self.item_id;

        let details = match result {
            Ok(outcome) => return self.succeed(command, outcome),
            Err(details) => details,
        };

        let message = match command {
            Command::LoadFolders => "Could not load your folders",
            Command::AddToFolder(_) => "Could not add the item to favorites",
            Command::CreateFolder(_) => "Could not create the folder",
            Command::RemoveFromFolder(_) => "Could not remove the item from favorites",
        };
        tracing::warn!("{message} for item {item_id}: {details}");

        Step::stay(self).with_notice(Notice::Failure {
            message: message.to_owned(),
            details,
        })
    }

    fn succeed(self, command: Command, outcome: Outcome) -> Step {
        let item_id = self.item_id;

        match (self.status, command, outcome) {
            (Status::Unfavorited, Command::LoadFolders, Outcome::FoldersLoaded(folders)) => {
                Step::stay(Self::new(
                    item_id,
                    Status::PickingFolder(FolderPicker {
                        folders,
                        selected_folder: None,
                        new_folder_name: String::new(),
                    }),
                ))
            }
            (Status::PickingFolder(picker), Command::LoadFolders, Outcome::FoldersLoaded(folders)) => {
                let selected_folder = picker
                    .selected_folder
                    .filter(|selected| folders.iter().any(|folder| folder.id == *selected));

                Step::stay(Self::new(
                    item_id,
                    Status::PickingFolder(FolderPicker {
                        folders,
                        selected_folder,
                        new_folder_name: picker.new_folder_name,
                    }),
                ))
            }
            (Status::PickingFolder(picker), Command::AddToFolder(folder_id), _) => {
                let folder_name = picker
                    .folders
                    .iter()
                    .find(|folder| folder.id == folder_id)
                    .map(|folder| folder.name.as_str())
                    .unwrap_or("your favorites");
                let message = format!("Added to {folder_name}");

                Step::stay(Self::new(
                    item_id,
                    Status::Favorited {
                        folder_id: Some(folder_id),
                    },
                ))
                .with_notice(Notice::Success(message))
            }
            (Status::PickingFolder(picker), Command::CreateFolder(folder_name), _) => {
                let picker = FolderPicker {
                    new_folder_name: String::new(),
                    ..picker
                };

                Step::call(
                    Self::new(item_id, Status::PickingFolder(picker)),
                    Command::LoadFolders,
                )
                .with_notice(Notice::Success(format!("Created folder {folder_name}")))
            }
            (Status::Favorited { .. }, Command::RemoveFromFolder(_), _) => {
                Step::stay(Self::new(item_id, Status::Unfavorited))
                    .with_notice(Notice::Success("Removed from favorites".to_owned()))
            }
            (status, command, _) => {
                tracing::warn!("Ignoring the result of {command:?} for item {item_id} in state {status:?}");
                Step::stay(Self::new(item_id, status))
            }
        }
    }
}

fn submit(item_id: ItemId, picker: FolderPicker) -> Step {
    let has_name = !picker.new_folder_name.trim().is_empty();

    let command = match (picker.selected_folder, has_name) {
        (Some(folder_id), false) => Command::AddToFolder(folder_id),
        (None, true) => match FolderName::new(&picker.new_folder_name) {
            Ok(folder_name) => Command::CreateFolder(folder_name),
            Err(error) => {
                return Step::stay(FavoriteWidget::new(item_id, Status::PickingFolder(picker)))
                    .with_notice(Notice::Invalid(error.to_string()));
            }
        },
        _ => {
            return Step::stay(FavoriteWidget::new(item_id, Status::PickingFolder(picker)))
                .with_notice(Notice::Invalid(Error::AmbiguousFolderChoice.to_string()));
        }
    };

    Step::call(
        FavoriteWidget::new(item_id, Status::PickingFolder(picker)),
        command,
    )
}

/// Work out the initial state of the widget for `item_id`.
///
/// `known_folder` is the folder the card is being shown in, if any.
///
/// # Errors
///
/// Returns [ApiError::Unauthorized] if the session token was rejected. Other
/// failures leave the widget unfavorited with a [Notice::Failure].
pub async fn mount<A>(
    api: &A,
    session: &Session,
    item_id: ItemId,
    known_folder: Option<FolderId>,
) -> Result<(FavoriteWidget, Option<Notice>), ApiError>
where
    A: FavoriteApi + Sync,
{
    match api.check_favorite(session, item_id).await {
        Ok(true) => Ok((
            FavoriteWidget::new(
                item_id,
                Status::Favorited {
                    folder_id: known_folder,
                },
            ),
            None,
        )),
        Ok(false) => Ok((FavoriteWidget::new(item_id, Status::Unfavorited), None)),
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
        Err(error) => {
            tracing::warn!("Could not check whether item {item_id} is a favorite: {error}");
            Ok((
                FavoriteWidget::new(item_id, Status::Unfavorited),
                Some(Notice::Failure {
                    message: "Could not load favorite status".to_owned(),
                    details: failure_details(&error),
                }),
            ))
        }
    }
}

/// Apply `event` to `widget`, making the remote calls the transitions ask for.
///
/// Returns the final widget and the notices produced along the way.
///
/// # Errors
///
/// Returns [ApiError::Unauthorized] if the session token was rejected. Other
/// remote failures are reported as a [Notice::Failure].
pub async fn run<A>(
    api: &A,
    session: &Session,
    widget: FavoriteWidget,
    event: Event,
) -> Result<(FavoriteWidget, Vec<Notice>), ApiError>
where
    A: FavoriteApi + Sync,
{
    let item_id = widget.item_id;
    let mut step = widget.apply(event);
    let mut notices: Vec<Notice> = step.notice.take().into_iter().collect();

    while let Some(command) = step.command.take() {
        let result = match execute(api, session, item_id, &command).await {
            Ok(outcome) => Ok(outcome),
            Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
            Err(error) => Err(failure_details(&error)),
        };

        step = step.widget.complete(command, result);
        notices.extend(step.notice.take());
    }

    Ok((step.widget, notices))
}

async fn execute<A>(
    api: &A,
    session: &Session,
    item_id: ItemId,
    command: &Command,
) -> Result<Outcome, ApiError>
where
    A: FavoriteApi + Sync,
{
    match command {
        Command::LoadFolders => api
            .list_folders(session)
            .await
            .map(Outcome::FoldersLoaded),
        Command::AddToFolder(folder_id) => api
            .add_to_folder(session, item_id, *folder_id)
            .await
            .map(|_| Outcome::Done),
        Command::CreateFolder(folder_name) => api
            .create_folder(session, folder_name)
            .await
            .map(|_| Outcome::Done),
        Command::RemoveFromFolder(folder_id) => api
            .remove_from_folder(session, item_id, *folder_id)
            .await
            .map(|_| Outcome::Done),
    }
}

fn failure_details(error: &ApiError) -> String {
    match error {
        ApiError::Status { message, .. } => message.clone(),
        ApiError::Request(_) => "Could not reach the marketplace, try again later.".to_owned(),
        ApiError::Unauthorized => "Your session has expired, log in again.".to_owned(),
    }
}

#[cfg(test)]
mod workflow_tests {
    use std::sync::Mutex;

    use crate::{
        ApiError, Error,
        auth::{Session, UserId},
        favorite::{
            FavoriteApi, FavoriteFolder, FolderId, FolderName,
            workflow::{Event, FavoriteWidget, FolderPicker, Notice, Status, mount, run},
        },
        item::ItemId,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        ListFolders,
        CheckFavorite(ItemId),
        AddToFolder(ItemId, FolderId),
        CreateFolder(String),
        RemoveFromFolder(ItemId, Option<FolderId>),
    }

    /// An in-memory marketplace that records every call made to it.
    #[derive(Default)]
    struct RecordingApi {
        folders: Mutex<Vec<FavoriteFolder>>,
        favorites: Mutex<Vec<(ItemId, FolderId)>>,
        calls: Mutex<Vec<Call>>,
        failure: Option<fn() -> ApiError>,
    }

    impl RecordingApi {
        fn with_folders(folders: &[(FolderId, &str)]) -> Self {
            let folders = folders
                .iter()
                .map(|(id, name)| FavoriteFolder {
                    id: *id,
                    user_id: UserId::new(1),
                    name: name.to_string(),
                })
                .collect();

            Self {
                folders: Mutex::new(folders),
                ..Default::default()
            }
        }

        fn failing(failure: fn() -> ApiError) -> Self {
            Self {
                failure: Some(failure),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call);

            match self.failure {
                Some(failure) => Err(failure()),
                None => Ok(()),
            }
        }
    }

    impl FavoriteApi for RecordingApi {
        async fn list_folders(&self, _: &Session) -> Result<Vec<FavoriteFolder>, ApiError> {
            self.record(Call::ListFolders)?;

            Ok(self.folders.lock().unwrap().clone())
        }

        async fn check_favorite(&self, _: &Session, item_id: ItemId) -> Result<bool, ApiError> {
            self.record(Call::CheckFavorite(item_id))?;

            Ok(self
                .favorites
                .lock()
                .unwrap()
                .iter()
                .any(|(id, _)| *id == item_id))
        }

        async fn add_to_folder(
            &self,
            _: &Session,
            item_id: ItemId,
            folder_id: FolderId,
        ) -> Result<(), ApiError> {
            self.record(Call::AddToFolder(item_id, folder_id))?;
            self.favorites.lock().unwrap().push((item_id, folder_id));

            Ok(())
        }

        async fn create_folder(&self, _: &Session, folder_name: &FolderName) -> Result<(), ApiError> {
            self.record(Call::CreateFolder(folder_name.to_string()))?;
            let mut folders = self.folders.lock().unwrap();
            let id = folders.len() as FolderId + 1;
            folders.push(FavoriteFolder {
                id,
                user_id: UserId::new(1),
                name: folder_name.to_string(),
            });

            Ok(())
        }

        async fn remove_from_folder(
            &self,
            _: &Session,
            item_id: ItemId,
            folder_id: Option<FolderId>,
        ) -> Result<(), ApiError> {
            self.record(Call::RemoveFromFolder(item_id, folder_id))?;
            self.favorites
                .lock()
                .unwrap()
                .retain(|(id, folder)| *id != item_id || folder_id != Some(*folder));

            Ok(())
        }
    }

    fn session() -> Session {
        Session {
            user_id: UserId::new(1),
            token: "token".to_owned(),
        }
    }

    fn gifts() -> FavoriteFolder {
        FavoriteFolder {
            id: 1,
            user_id: UserId::new(1),
            name: "Gifts".to_owned(),
        }
    }

    fn picking(selected_folder: Option<FolderId>, new_folder_name: &str) -> FavoriteWidget {
        FavoriteWidget::new(
            42,
            Status::PickingFolder(FolderPicker {
                folders: vec![gifts()],
                selected_folder,
                new_folder_name: new_folder_name.to_owned(),
            }),
        )
    }

    fn status_error() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "database is down".to_owned(),
        }
    }

    #[tokio::test]
    async fn toggle_opens_picker_with_folders() {
        let api = RecordingApi::with_folders(&[(1, "Gifts")]);
        let widget = FavoriteWidget::new(42, Status::Unfavorited);

        let (widget, notices) = run(&api, &session(), widget, Event::Toggle).await.unwrap();

        assert_eq!(widget, picking(None, ""));
        assert!(notices.is_empty());
        assert_eq!(api.calls(), vec![Call::ListFolders]);
    }

    #[tokio::test]
    async fn toggle_with_no_folders_opens_empty_picker() {
        let api = RecordingApi::default();
        let widget = FavoriteWidget::new(42, Status::Unfavorited);

        let (widget, _) = run(&api, &session(), widget, Event::Toggle).await.unwrap();

        assert_eq!(
            widget.status,
            Status::PickingFolder(FolderPicker::default())
        );
    }

    #[tokio::test]
    async fn toggle_failure_stays_unfavorited() {
        let api = RecordingApi::failing(status_error);
        let widget = FavoriteWidget::new(42, Status::Unfavorited);

        let (widget, notices) = run(&api, &session(), widget, Event::Toggle).await.unwrap();

        assert_eq!(widget.status, Status::Unfavorited);
        assert_eq!(
            notices,
            vec![Notice::Failure {
                message: "Could not load your folders".to_owned(),
                details: "database is down".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn toggle_while_picking_cancels_without_calls() {
        let api = RecordingApi::with_folders(&[(1, "Gifts")]);

        let (widget, _) = run(&api, &session(), picking(Some(1), ""), Event::Toggle)
            .await
            .unwrap();

        assert_eq!(widget.status, Status::Unfavorited);
        assert!(api.calls().is_empty());
        assert!(api.favorites.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn close_makes_no_calls() {
        let api = RecordingApi::with_folders(&[(1, "Gifts")]);

        let (widget, notices) = run(&api, &session(), picking(None, "Wish"), Event::Close)
            .await
            .unwrap();

        assert_eq!(widget.status, Status::Unfavorited);
        assert!(notices.is_empty());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn selecting_same_folder_twice_clears_selection() {
        let step = picking(None, "").apply(Event::SelectFolder(1));
        assert_eq!(step.widget, picking(Some(1), ""));
        assert_eq!(step.command, None);

        let step = step.widget.apply(Event::SelectFolder(1));

        assert_eq!(step.widget, picking(None, ""));
        assert_eq!(step.command, None);
    }

    #[test]
    fn selecting_unknown_folder_is_ignored() {
        let step = picking(None, "").apply(Event::SelectFolder(99));

        assert_eq!(step.widget, picking(None, ""));
    }

    #[tokio::test]
    async fn submit_with_existing_folder_adds_item() {
        let api = RecordingApi::with_folders(&[(1, "Gifts")]);

        let (widget, notices) = run(&api, &session(), picking(Some(1), ""), Event::Submit)
            .await
            .unwrap();

        assert_eq!(widget.status, Status::Favorited { folder_id: Some(1) });
        assert_eq!(notices, vec![Notice::Success("Added to Gifts".to_owned())]);
        assert_eq!(api.calls(), vec![Call::AddToFolder(42, 1)]);
    }

    #[tokio::test]
    async fn open_select_and_submit_adds_item_to_gifts() {
        let api = RecordingApi::with_folders(&[(1, "Gifts")]);
        let widget = FavoriteWidget::new(42, Status::Unfavorited);

        let (widget, _) = run(&api, &session(), widget, Event::Toggle).await.unwrap();
        let (widget, _) = run(&api, &session(), widget, Event::SelectFolder(1))
            .await
            .unwrap();
        let (widget, _) = run(&api, &session(), widget, Event::Submit).await.unwrap();

        assert_eq!(widget.status, Status::Favorited { folder_id: Some(1) });
        assert_eq!(
            api.calls(),
            vec![Call::ListFolders, Call::AddToFolder(42, 1)]
        );
    }

    #[tokio::test]
    async fn submit_with_new_folder_name_creates_folder_and_reloads() {
        let api = RecordingApi::with_folders(&[(1, "Gifts")]);

        let (widget, notices) = run(&api, &session(), picking(None, "Wishlist"), Event::Submit)
            .await
            .unwrap();

        let Status::PickingFolder(picker) = widget.status else {
            panic!("want picker to stay open, got {:?}", widget.status);
        };
        assert_eq!(picker.new_folder_name, "");
        assert!(picker.folders.iter().any(|folder| folder.name == "Wishlist"));
        assert_eq!(
            notices,
            vec![Notice::Success("Created folder Wishlist".to_owned())]
        );
        assert_eq!(
            api.calls(),
            vec![Call::CreateFolder("Wishlist".to_owned()), Call::ListFolders]
        );
    }

    #[tokio::test]
    async fn submit_with_both_inputs_makes_no_calls() {
        let api = RecordingApi::with_folders(&[(1, "Gifts")]);

        let (widget, notices) = run(&api, &session(), picking(Some(1), "Wishlist"), Event::Submit)
            .await
            .unwrap();

        assert_eq!(widget, picking(Some(1), "Wishlist"));
        assert_eq!(
            notices,
            vec![Notice::Invalid(Error::AmbiguousFolderChoice.to_string())]
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn submit_with_neither_input_makes_no_calls() {
        let api = RecordingApi::with_folders(&[(1, "Gifts")]);

        for name in ["", "   "] {
            let (widget, notices) = run(&api, &session(), picking(None, name), Event::Submit)
                .await
                .unwrap();

            assert_eq!(widget, picking(None, name));
            assert_eq!(
                notices,
                vec![Notice::Invalid(Error::AmbiguousFolderChoice.to_string())]
            );
        }
        assert!(api.calls().is_empty());
    }

    #[test]
    fn ambiguous_submit_uses_error_message() {
        let step = picking(Some(1), "Wishlist").apply(Event::Submit);

        assert_eq!(
            step.notice,
            Some(Notice::Invalid(Error::AmbiguousFolderChoice.to_string()))
        );
        assert_eq!(
            Error::AmbiguousFolderChoice.to_string(),
            "Please select OR enter a folder name"
        );
        assert!(step.command.is_none());
    }

    #[tokio::test]
    async fn submit_with_long_folder_name_makes_no_calls() {
        let api = RecordingApi::default();
        let name = "a".repeat(FolderName::MAX_GRAPHEMES + 1);

        let (_, notices) = run(&api, &session(), picking(None, &name), Event::Submit)
            .await
            .unwrap();

        assert!(matches!(notices.as_slice(), [Notice::Invalid(_)]));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_add_keeps_picker_open_with_inputs() {
        let api = RecordingApi::failing(status_error);

        let (widget, notices) = run(&api, &session(), picking(Some(1), ""), Event::Submit)
            .await
            .unwrap();

        assert_eq!(widget, picking(Some(1), ""));
        assert!(matches!(notices.as_slice(), [Notice::Failure { .. }]));
    }

    #[tokio::test]
    async fn toggle_favorited_removes_from_known_folder() {
        let api = RecordingApi::default();
        api.favorites.lock().unwrap().push((42, 3));
        let widget = FavoriteWidget::new(42, Status::Favorited { folder_id: Some(3) });

        let (widget, notices) = run(&api, &session(), widget, Event::Toggle).await.unwrap();

        assert_eq!(widget.status, Status::Unfavorited);
        assert_eq!(
            notices,
            vec![Notice::Success("Removed from favorites".to_owned())]
        );
        assert_eq!(api.calls(), vec![Call::RemoveFromFolder(42, Some(3))]);
    }

    #[tokio::test]
    async fn toggle_favorited_with_unknown_folder_sends_null_folder() {
        let api = RecordingApi::default();
        api.favorites.lock().unwrap().push((42, 3));
        let widget = FavoriteWidget::new(42, Status::Favorited { folder_id: None });

        let (widget, _) = run(&api, &session(), widget, Event::Toggle).await.unwrap();

        assert_eq!(widget.status, Status::Unfavorited);
        assert_eq!(api.calls(), vec![Call::RemoveFromFolder(42, None)]);
        assert_eq!(*api.favorites.lock().unwrap(), vec![(42, 3)]);
    }

    #[tokio::test]
    async fn failed_remove_stays_favorited() {
        let api = RecordingApi::failing(status_error);
        let widget = FavoriteWidget::new(42, Status::Favorited { folder_id: None });

        let (widget, notices) = run(&api, &session(), widget, Event::Toggle).await.unwrap();

        assert_eq!(widget.status, Status::Favorited { folder_id: None });
        assert!(matches!(notices.as_slice(), [Notice::Failure { .. }]));
        assert_eq!(api.calls(), vec![Call::RemoveFromFolder(42, None)]);
    }

    #[tokio::test]
    async fn unauthorized_is_returned_as_error() {
        let api = RecordingApi::failing(|| ApiError::Unauthorized);
        let widget = FavoriteWidget::new(42, Status::Unfavorited);

        let result = run(&api, &session(), widget, Event::Toggle).await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn events_outside_picker_are_ignored() {
        let api = RecordingApi::default();
        let widget = FavoriteWidget::new(42, Status::Favorited { folder_id: Some(1) });

        for event in [Event::Submit, Event::Close, Event::SelectFolder(1)] {
            let (got, notices) = run(&api, &session(), widget.clone(), event).await.unwrap();

            assert_eq!(got, widget);
            assert!(notices.is_empty());
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn mount_uses_check_and_known_folder() {
        let api = RecordingApi::default();
        api.favorites.lock().unwrap().push((42, 2));

        let (widget, notice) = mount(&api, &session(), 42, Some(2)).await.unwrap();

        assert_eq!(widget.status, Status::Favorited { folder_id: Some(2) });
        assert_eq!(notice, None);
        assert_eq!(api.calls(), vec![Call::CheckFavorite(42)]);
    }

    #[tokio::test]
    async fn mount_failure_shows_unfavorited_with_notice() {
        let api = RecordingApi::failing(status_error);

        let (widget, notice) = mount(&api, &session(), 42, None).await.unwrap();

        assert_eq!(widget.status, Status::Unfavorited);
        assert!(matches!(notice, Some(Notice::Failure { .. })));
    }
}
