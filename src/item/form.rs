//! The listing form shared by the sell and edit pages.

use axum::extract::{Multipart, multipart::Field};
use maud::{Markup, html};

use crate::{
    Error,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    item::{Category, CategoryId, ImageUpload, ItemListing, ItemName, Price},
};

/// The values to prefill the listing form with.
#[derive(Debug, Default)]
pub struct ListingFormValues<'a> {
    pub name: &'a str,
    pub category_id: Option<CategoryId>,
    pub price: Option<u64>,
    pub description: &'a str,
}

/// Render the listing form.
///
/// The form is sent with `method` ("post" or "put") to `action`. The image
/// input is only required when `image_required` is set.
pub fn listing_form(
    method: &str,
    action: &str,
    submit_text: &str,
    values: &ListingFormValues,
    categories: &[Category],
    image_required: bool,
) -> Markup {
    html! {
        form
            hx-post=[(method == "post").then_some(action)]
            hx-put=[(method == "put").then_some(action)]
            hx-encoding="multipart/form-data"
            hx-swap="none"
            hx-indicator="#indicator"
            hx-disabled-elt="find button[type=submit]"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    type="text"
                    name="name"
                    id="name"
                    placeholder="Item name"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(values.name);
            }

            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category_id" id="category_id" class=(FORM_TEXT_INPUT_STYLE) required
                {
                    @for category in categories {
                        option
                            value=(category.id)
                            selected[values.category_id == Some(category.id)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            div
            {
                label for="price" class=(FORM_LABEL_STYLE) { "Price" }

                div class="input-wrapper"
                {
                    input
                        type="number"
                        name="price"
                        id="price"
                        min="0"
                        step="1"
                        placeholder="0"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required
                        value=[values.price];
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                textarea
                    name="description"
                    id="description"
                    rows="4"
                    placeholder="Describe the condition of the item"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (values.description)
                }
            }

            div
            {
                label for="image" class=(FORM_LABEL_STYLE) { "Image" }

                input
                    type="file"
                    name="image"
                    id="image"
                    accept="image/*"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required[image_required];
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                (submit_text)
            }
        }
    }
}

/// The raw fields of a submitted listing form.
#[derive(Debug, Default)]
pub struct ListingFormData {
    pub name: String,
    pub category_id: String,
    pub price: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

impl ListingFormData {
    /// Read the listing form from a multipart request.
    ///
    /// A file input left empty by the browser is read as no image.
    ///
    /// # Errors
    ///
    /// Returns [Error::MultipartError] if the request body cannot be read.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, Error> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|error| {
            tracing::error!("Could not read multipart form field: {error}");
            Error::MultipartError(error.body_text())
        })? {
            let name = field.name().unwrap_or_default().to_owned();

            match name.as_str() {
                "name" => form.name = read_text(field).await?,
                "category_id" => form.category_id = read_text(field).await?,
                "price" => form.price = read_text(field).await?,
                "description" => form.description = read_text(field).await?,
                "image" => form.image = read_image(field).await?,
                other => tracing::debug!("Ignoring unknown listing form field {other:?}"),
            }
        }

        Ok(form)
    }

    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field, or
    /// [Error::MissingImage] if `image_required` is set and no image was sent.
    pub fn into_listing(self, image_required: bool) -> Result<ItemListing, Error> {
        let name = ItemName::new(&self.name)?;
        let category_id = self
            .category_id
            .trim()
            .parse::<CategoryId>()
            .map_err(|_| Error::InvalidCategory(self.category_id.clone()))?;
        let price = self.price.parse::<Price>()?;

        if image_required && self.image.is_none() {
            return Err(Error::MissingImage);
        }

        Ok(ItemListing {
            name,
            category_id,
            price,
            description: self.description.trim().to_owned(),
            image: self.image,
        })
    }
}

async fn read_text(field: Field<'_>) -> Result<String, Error> {
    field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError(error.body_text())
    })
}

async fn read_image(field: Field<'_>) -> Result<Option<ImageUpload>, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_owned();
    let bytes = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read image from multipart form field: {error}");
        Error::MultipartError(error.body_text())
    })?;

    if bytes.is_empty() {
        return Ok(None);
    }

    tracing::debug!("Received image '{file_name}' that is {} bytes", bytes.len());

    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}
