//! Demo host: a user directory over a randomuser-style JSON payload.
//!
//! The payload is fetched by the page; this module decodes it, declares the
//! nine-column schema and, in the browser, mounts the grid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{CellContent, ColumnDescriptor};

/// One user row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    /// Avatar image URL
    pub avatar: String,
    pub age: u32,
    pub birthday: DateTime<Utc>,
}

impl UserRecord {
    /// Birthday as shown in the grid (month/day/year).
    pub fn birthday_label(&self) -> String {
        self.birthday.format("%-m/%-d/%Y").to_string()
    }
}

#[derive(Deserialize)]
struct Payload {
    results: Vec<RawUser>,
}

#[derive(Deserialize)]
struct RawUser {
    name: RawName,
    email: String,
    gender: String,
    phone: String,
    picture: RawPicture,
    dob: RawDob,
}

#[derive(Deserialize)]
struct RawName {
    first: String,
    last: String,
}

#[derive(Deserialize)]
struct RawPicture {
    large: String,
}

#[derive(Deserialize)]
struct RawDob {
    date: DateTime<Utc>,
    age: u32,
}

impl From<RawUser> for UserRecord {
    fn from(raw: RawUser) -> Self {
        Self {
            first_name: raw.name.first,
            last_name: raw.name.last,
            gender: raw.gender,
            email: raw.email,
            phone: raw.phone,
            avatar: raw.picture.large,
            age: raw.dob.age,
            birthday: raw.dob.date,
        }
    }
}

/// Decode a `{"results": [...]}` payload.
///
/// # Errors
/// Returns `GridError::Json` if the payload does not have the expected shape.
pub fn decode_users(json: &str) -> Result<Vec<UserRecord>> {
    let payload: Payload = serde_json::from_str(json)?;
    Ok(payload.results.into_iter().map(UserRecord::from).collect())
}

/// Decode a payload, degrading to no rows on failure.
pub fn users_or_empty(json: &str) -> Vec<UserRecord> {
    match decode_users(json) {
        Ok(users) => {
            log::debug!("decoded {} users", users.len());
            users
        }
        Err(e) => {
            log::warn!("user payload rejected, showing no rows: {e}");
            Vec::new()
        }
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The user directory schema.
pub fn user_schema() -> Vec<ColumnDescriptor<UserRecord>> {
    vec![
        ColumnDescriptor::new("actions", |_: &UserRecord, _| {
            CellContent::html(
                r#"<div class="user-actions"><i class="icon icon-edit"></i><i class="icon icon-delete"></i></div>"#,
            )
        })
        .name("Actions")
        .width(100)
        .sortable(false)
        .clickable(false)
        .resizable(false),
        ColumnDescriptor::new("avatar", |u: &UserRecord, _| {
            CellContent::html(format!(
                r#"<div class="avatar"><img src="{}" alt="avatar"></div>"#,
                escape_attr(&u.avatar)
            ))
        })
        .name("Avatar")
        .width(100)
        .sortable(false)
        .clickable(false)
        .resizable(false),
        ColumnDescriptor::new("name", |u: &UserRecord, _| u.first_name.as_str().into())
            .name("Name")
            .width(180)
            .value(|u| u.first_name.as_str().into()),
        ColumnDescriptor::new("surname", |u: &UserRecord, _| u.last_name.as_str().into())
            .name("Surname")
            .width(180)
            .value(|u| u.last_name.as_str().into()),
        ColumnDescriptor::new("gender", |u: &UserRecord, _| u.gender.as_str().into())
            .name("Gender")
            .width(75)
            .value(|u| u.gender.as_str().into()),
        ColumnDescriptor::new("age", |u: &UserRecord, _| u.age.to_string().into())
            .name("Age")
            .width(75)
            .value(|u| u.age.into()),
        ColumnDescriptor::new("birthday", |u: &UserRecord, _| u.birthday_label().into())
            .name("Birthday")
            .width(100)
            .value(|u| u.birthday.timestamp_millis().into()),
        ColumnDescriptor::new("email", |u: &UserRecord, _| u.email.as_str().into())
            .name("Email")
            .width(300)
            .value(|u| u.email.as_str().into()),
        ColumnDescriptor::new("phone", |u: &UserRecord, _| u.phone.as_str().into())
            .name("Phone")
            .width(100)
            .value(|u| u.phone.as_str().into()),
    ]
}

#[cfg(target_arch = "wasm32")]
pub use web::UserGrid;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use wasm_bindgen::prelude::*;
    use web_sys::HtmlElement;

    use super::{user_schema, users_or_empty, UserRecord};
    use crate::error::GridError;
    use crate::grid::dom::DomGrid;
    use crate::grid::Grid;
    use crate::types::GridConfig;

    /// The user directory mounted into a page element.
    ///
    /// # Usage (JavaScript)
    ///
    /// ```javascript
    /// import init, { UserGrid } from 'datagrid';
    /// await init();
    /// const payload = await (await fetch('https://randomuser.me/api/?results=1000')).text();
    /// const grid = new UserGrid(document.getElementById('app'), payload, { rowHeight: 72 });
    /// grid.scroll_to_index(500);
    /// grid.destroy();
    /// ```
    #[wasm_bindgen]
    pub struct UserGrid {
        inner: Option<DomGrid<UserRecord>>,
    }

    #[wasm_bindgen]
    impl UserGrid {
        /// Mount the grid into `wrapper`.
        ///
        /// A payload that fails to decode renders an empty grid.
        ///
        /// # Errors
        /// Returns an error for an invalid config or if the DOM cannot be built.
        #[wasm_bindgen(constructor)]
        pub fn new(wrapper: &HtmlElement, payload: &str, config: JsValue) -> Result<UserGrid, JsValue> {
            let config: GridConfig = if config.is_undefined() || config.is_null() {
                GridConfig::default()
            } else {
                serde_wasm_bindgen::from_value(config)
                    .map_err(|e| GridError::Config(e.to_string()))?
            };
            config.validate()?;

            let grid = Grid::new(user_schema(), config).on_cell_click(|_, user: &UserRecord| {
                log::info!("clicked {} {}", user.first_name, user.last_name);
            });
            let inner = DomGrid::mount(wrapper, grid, users_or_empty(payload))?;
            Ok(UserGrid { inner: Some(inner) })
        }

        pub fn scroll_to_index(&self, index: usize) {
            if let Some(grid) = &self.inner {
                grid.scroll_to_index(index);
            }
        }

        /// Sort by a column key, as a header click would.
        ///
        /// # Errors
        /// Returns an error for an unknown key or a destroyed grid.
        pub fn sort_by(&self, key: &str) -> Result<JsValue, JsValue> {
            let grid = self
                .inner
                .as_ref()
                .ok_or_else(|| GridError::Dom("grid destroyed".into()))?;
            let state = grid.sort_by_key(key)?;
            serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&e.to_string()))
        }

        /// Active sort as `{key, order}` or `null`.
        ///
        /// # Errors
        /// Returns an error if the value cannot be converted to JS.
        pub fn sort_state(&self) -> Result<JsValue, JsValue> {
            let state = self.inner.as_ref().and_then(DomGrid::sort_state);
            serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&e.to_string()))
        }

        /// Current widths keyed by column.
        ///
        /// # Errors
        /// Returns an error if the value cannot be converted to JS.
        pub fn column_widths(&self) -> Result<JsValue, JsValue> {
            let widths: HashMap<String, u32> = self
                .inner
                .as_ref()
                .map(DomGrid::column_widths)
                .unwrap_or_default();
            serde_wasm_bindgen::to_value(&widths).map_err(|e| JsValue::from_str(&e.to_string()))
        }

        pub fn row_count(&self) -> usize {
            self.inner.as_ref().map_or(0, DomGrid::row_count)
        }

        /// Unmount: removes the grid's elements and listeners.
        pub fn destroy(&mut self) {
            self.inner = None;
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::GridConfig;

    const PAYLOAD: &str = r#"{
        "results": [
            {
                "gender": "female",
                "name": {"title": "Ms", "first": "Zoe", "last": "Adams"},
                "email": "zoe.adams@example.com",
                "phone": "555-0101",
                "picture": {"large": "https://example.com/z.jpg", "thumbnail": "t.jpg"},
                "dob": {"date": "1990-02-03T10:00:00.000Z", "age": 34}
            },
            {
                "gender": "male",
                "name": {"title": "Mr", "first": "adam", "last": "Young"},
                "email": "adam.young@example.com",
                "phone": "555-0102",
                "picture": {"large": "https://example.com/a.jpg?x=1&y=\"2\""},
                "dob": {"date": "1975-11-20T08:30:00.000Z", "age": 49}
            }
        ],
        "info": {"seed": "abc", "results": 2}
    }"#;

    #[test]
    fn test_decode_users() {
        let users = decode_users(PAYLOAD).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].first_name, "Zoe");
        assert_eq!(users[0].avatar, "https://example.com/z.jpg");
        assert_eq!(users[0].age, 34);
        assert_eq!(users[0].birthday_label(), "2/3/1990");
    }

    #[test]
    fn test_bad_payload_degrades_to_empty() {
        assert!(decode_users(r#"{"results": [{"name": 1}]}"#).is_err());
        assert!(users_or_empty("not json").is_empty());
        assert!(users_or_empty(r#"{"error": "rate limited"}"#).is_empty());
    }

    #[test]
    fn test_schema_shape() {
        let schema = user_schema();
        let keys: Vec<&str> = schema.iter().map(ColumnDescriptor::key).collect();
        assert_eq!(
            keys,
            vec!["actions", "avatar", "name", "surname", "gender", "age", "birthday", "email", "phone"]
        );
        for fixed in &schema[..2] {
            assert!(!fixed.options.sortable && !fixed.options.clickable && !fixed.options.resizable);
        }
        assert!(schema[2..].iter().all(|c| c.options.sortable && c.options.resizable));
    }

    #[test]
    fn test_avatar_markup_is_escaped() {
        let users = decode_users(PAYLOAD).unwrap();
        let cell = user_schema()[1].render_cell(&users[1], 1);
        assert_eq!(
            cell,
            CellContent::html(
                r#"<div class="avatar"><img src="https://example.com/a.jpg?x=1&amp;y=&quot;2&quot;" alt="avatar"></div>"#
            )
        );
    }

    #[test]
    fn test_sort_demo_columns() {
        let mut users = decode_users(PAYLOAD).unwrap();
        let mut grid = Grid::new(user_schema(), GridConfig::default());

        grid.sort_by_key("name", &mut users).unwrap();
        assert_eq!(users[0].first_name, "adam");

        grid.sort_by_key("birthday", &mut users).unwrap();
        assert_eq!(users[0].first_name, "adam");
        grid.sort_by_key("birthday", &mut users).unwrap();
        assert_eq!(users[0].first_name, "Zoe");

        assert_eq!(grid.sort_by_key("actions", &mut users).unwrap(), None);
    }

    #[test]
    fn test_initial_widths_fill_container() {
        let mut grid = Grid::new(user_schema(), GridConfig::default());
        // Gender and Age ask for 75 but resizable columns never go below 100
        assert_eq!(grid.widths().width("gender"), Some(100));
        grid.observe_container_width(1600);
        assert_eq!(grid.widths().total_width(), 1600);
        assert_eq!(grid.widths().width("actions"), Some(100));
    }
}
