//! Renders the favorite widget and reads its state back from the widget form.
//!
//! The whole widget is one `<form>` whose hidden fields hold the widget state,
//! so every request from the widget carries only its own card's state and the
//! server does not need to remember anything between requests.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    auth::UserId,
    endpoints::{self, format_endpoint},
    favorite::{
        FavoriteFolder, FolderId,
        workflow::{FavoriteWidget, FolderPicker, Status},
    },
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    item::ItemId,
};

/// Which [Status] the widget form describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    Unfavorited,
    PickingFolder,
    Favorited,
}

/// The fields of the widget form.
///
/// Deserialize with [axum_extra::extract::Form] since the folder list is sent
/// as repeated `folder_ids` and `folder_names` keys.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetForm {
    /// The state the widget was rendered in.
    pub state: WidgetState,
    /// The folder a favorited item was last known to be in.
    pub folder_id: Option<FolderId>,
    /// The folder selected in the picker.
    pub selected_folder_id: Option<FolderId>,
    /// The text in the new folder input.
    #[serde(default)]
    pub new_folder_name: String,
    /// The IDs of the folders shown in the picker.
    #[serde(default)]
    pub folder_ids: Vec<FolderId>,
    /// The names of the folders shown in the picker, in the same order as
    /// `folder_ids`.
    #[serde(default)]
    pub folder_names: Vec<String>,
    /// The folder that was just clicked in the picker.
    pub clicked_folder_id: Option<FolderId>,
}

impl WidgetForm {
    /// Rebuild the widget for `item_id` owned by `user_id` from the form.
    pub fn into_widget(self, item_id: ItemId, user_id: UserId) -> FavoriteWidget {
        let status = match self.state {
            WidgetState::Unfavorited => Status::Unfavorited,
            WidgetState::Favorited => Status::Favorited {
                folder_id: self.folder_id,
            },
            WidgetState::PickingFolder => {
                let folders = self
                    .folder_ids
                    .into_iter()
                    .zip(self.folder_names)
                    .map(|(id, name)| FavoriteFolder { id, user_id, name })
                    .collect();

                Status::PickingFolder(FolderPicker {
                    folders,
                    selected_folder: self.selected_folder_id,
                    new_folder_name: self.new_folder_name,
                })
            }
        };

        FavoriteWidget::new(item_id, status)
    }
}

/// The DOM ID of the favorite widget for `item_id`.
pub fn widget_id(item_id: ItemId) -> String {
    format!("favorite-{item_id}")
}

/// A placeholder that loads the widget for `item_id` as soon as it is shown.
///
/// `folder_id` is the folder the card is being shown in, if known.
pub fn favorite_widget_placeholder(item_id: ItemId, folder_id: Option<FolderId>) -> Markup {
    let widget_url = format_endpoint(endpoints::FAVORITE_WIDGET, item_id);
    let widget_url = match folder_id {
        Some(folder_id) => format!("{widget_url}?folder_id={folder_id}"),
        None => widget_url,
    };

    html! {
        div
            id=(widget_id(item_id))
            class="favorite-widget"
            hx-get=(widget_url)
            hx-trigger="load"
            hx-swap="outerHTML"
        {
            (loading_spinner())
        }
    }
}

const HEART_BUTTON_STYLE: &str = "inline-flex items-center justify-center w-9 h-9 \
    rounded-full bg-white/90 dark:bg-gray-800/90 shadow text-xl leading-none \
    hover:scale-110 transition";

/// Render `widget`, with `validation_message` shown under the picker inputs.
pub fn favorite_widget(widget: &FavoriteWidget, validation_message: Option<&str>) -> Markup {
    let item_id = widget.item_id;
    let is_favorite = matches!(widget.status, Status::Favorited { .. });
    let (heart, heart_label, heart_color) = if is_favorite {
        ("♥", "Remove from favorites", "text-red-500")
    } else {
        ("♡", "Add to favorites", "text-gray-500 dark:text-gray-300")
    };

    html! {
        form
            id=(widget_id(item_id))
            class="favorite-widget"
            hx-post=(format_endpoint(endpoints::FAVORITE_SUBMIT, item_id))
            hx-target="this"
            hx-swap="outerHTML"
        {
            (state_fields(widget))

            button
                type="button"
                class={ (HEART_BUTTON_STYLE) " " (heart_color) }
                aria-label=(heart_label)
                aria-pressed=(if is_favorite { "true" } else { "false" })
                hx-post=(format_endpoint(endpoints::FAVORITE_TOGGLE, item_id))
            {
                (heart)
            }

            @if let Status::PickingFolder(picker) = &widget.status {
                (folder_picker(item_id, picker, validation_message))
            }
        }
    }
}

fn state_fields(widget: &FavoriteWidget) -> Markup {
    let state = match widget.status {
        Status::Unfavorited => "unfavorited",
        Status::PickingFolder(_) => "picking_folder",
        Status::Favorited { .. } => "favorited",
    };

    html! {
        input type="hidden" name="state" value=(state);

        @match &widget.status {
            Status::Favorited { folder_id: Some(folder_id) } => {
                input type="hidden" name="folder_id" value=(folder_id);
            }
            Status::PickingFolder(picker) => {
                @if let Some(selected) = picker.selected_folder {
                    input type="hidden" name="selected_folder_id" value=(selected);
                }

                @for folder in &picker.folders {
                    input type="hidden" name="folder_ids" value=(folder.id);
                    input type="hidden" name="folder_names" value=(folder.name);
                }
            }
            _ => {}
        }
    }
}

fn folder_picker(item_id: ItemId, picker: &FolderPicker, validation_message: Option<&str>) -> Markup {
    let title_id = format!("{}-title", widget_id(item_id));
    let name_input_id = format!("{}-new-folder", widget_id(item_id));

    html! {
        div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 px-4"
            role="dialog"
            aria-modal="true"
            aria-labelledby=(title_id)
        {
            div class="w-full max-w-sm space-y-4 rounded-lg bg-white p-6 shadow-xl dark:bg-gray-800 text-gray-900 dark:text-white"
            {
                h2 id=(title_id) class="text-lg font-semibold" { "Add to favorites" }

                @if !picker.folders.is_empty() {
                    fieldset class=(FORM_RADIO_GROUP_STYLE)
                    {
                        legend class=(FORM_LABEL_STYLE) { "Choose a folder" }

                        @for folder in &picker.folders {
                            @let radio_id = format!("{}-folder-{}", widget_id(item_id), folder.id);

                            div class="flex items-center gap-2"
                            {
                                input
                                    type="radio"
                                    id=(radio_id)
                                    name="folder_choice"
                                    value=(folder.id)
                                    class=(FORM_RADIO_INPUT_STYLE)
                                    checked[picker.selected_folder == Some(folder.id)]
                                    hx-post=(format_endpoint(endpoints::FAVORITE_SELECT, item_id))
                                    hx-trigger="click"
                                    hx-vals=(format!(r#"{{"clicked_folder_id": {}}}"#, folder.id));

                                label for=(radio_id) class=(FORM_RADIO_LABEL_STYLE) { (folder.name) }
                            }
                        }
                    }
                }

                div
                {
                    label for=(name_input_id) class=(FORM_LABEL_STYLE)
                    {
                        @if picker.folders.is_empty() { "New folder" } @else { "Or create a new folder" }
                    }

                    input
                        type="text"
                        id=(name_input_id)
                        name="new_folder_name"
                        placeholder="Folder name"
                        autocomplete="off"
                        class=(FORM_TEXT_INPUT_STYLE)
                        value=(picker.new_folder_name);

                    @if let Some(message) = validation_message {
                        p class="text-red-500 text-base" role="alert" { (message) }
                    }
                }

                div class="flex gap-2"
                {
                    button
                        type="button"
                        class=(BUTTON_SECONDARY_STYLE)
                        hx-post=(format_endpoint(endpoints::FAVORITE_CLOSE, item_id))
                    {
                        "Close"
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
                }
            }
        }
    }
}
