//! Browser binding for `Grid`.
//!
//! Builds a semantic table inside a host wrapper element, keeps it in sync
//! with the grid model and forwards mouse input back to the grid.
//!
//! ```text
//! wrapper
//! └ div.table                  scroll element (ResizeObserver on wrapper)
//!   └ table                    table-layout: fixed
//!     ├ colgroup > col*        live column widths
//!     ├ thead > tr.table-header > th* > span.table-header-cell-title + handle
//!     └ tbody > spacer, tr.table-row*, spacer
//! ```
//!
//! Handlers extract what they need from the shared state and drop the borrow
//! before touching the DOM: DOM changes can synchronously fire scroll events
//! whose closure needs `borrow_mut()`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Once;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, MouseEvent, ResizeObserver, ResizeObserverEntry,
};

use super::{
    BodyView, Cursor, Grid, HeaderCellView, HitTarget, PointerEvent, CELL_CLASS, HANDLE_CLASS,
    HEADER_TITLE_CLASS,
};
use crate::error::{GridError, Result};
use crate::types::{CellContent, SortState};

const SCROLLER_CLASS: &str = "table";
const HEADER_ROW_CLASS: &str = "table-header";
const HEADER_CELL_CLASS: &str = "table-header-cell";
const SORT_ICON_CLASS: &str = "table-header-cell-sort";
const SPACER_CLASS: &str = "table-spacer";

struct Shared<R> {
    grid: Grid<R>,
    rows: Vec<R>,
}

impl<R> Shared<R> {
    fn header(&self) -> (Vec<HeaderCellView>, u32) {
        (self.grid.header(), self.grid.widths().total_width())
    }

    fn body(&self) -> BodyView {
        self.grid.body(&self.rows)
    }
}

/// Elements owned by one mounted grid
struct Elements {
    document: Document,
    scroller: HtmlElement,
    table: HtmlElement,
    colgroup: Element,
    header_row: Element,
    tbody: Element,
}

/// Event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// A `Grid` mounted into the page
pub struct DomGrid<R: 'static> {
    state: Rc<RefCell<Shared<R>>>,
    elements: Rc<Elements>,
    listeners: Vec<Listener>,
    observer: ResizeObserver,
    _observer_closure: Closure<dyn FnMut(js_sys::Array)>,
}

fn create(document: &Document, tag: &str, class: &str) -> Result<Element> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

fn create_html(document: &Document, tag: &str, class: &str) -> Result<HtmlElement> {
    create(document, tag, class)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GridError::Dom(format!("<{tag}> is not an HtmlElement")))
}

fn set_content(element: &Element, content: &CellContent) {
    match content {
        CellContent::Empty => element.set_text_content(None),
        CellContent::Text(text) => element.set_text_content(Some(text)),
        CellContent::Html(markup) => element.set_inner_html(markup),
    }
}

/// Route `log` records to the browser console, once per page.
fn init_console_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| wasm_logger::init(wasm_logger::Config::new(log::Level::Info)));
}

fn set_cursor(document: &Document, cursor: Cursor) {
    if let Some(body) = document.body() {
        let _ = body.style().set_property("cursor", cursor.as_css());
    }
}

/// Index stored in a `data-*` attribute of `element` or its nearest ancestor
/// matching `selector`.
fn data_index(element: &Element, selector: &str, attribute: &str) -> Option<usize> {
    element
        .closest(selector)
        .ok()
        .flatten()?
        .get_attribute(attribute)?
        .parse()
        .ok()
}

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Classify a mouse event target by the classes of the elements under it.
fn classify(element: &Element) -> HitTarget {
    let column = |selector: &str| data_index(element, selector, "data-col");
    if let Ok(Some(_)) = element.closest(&format!(".{HANDLE_CLASS}")) {
        return column("th").map_or(HitTarget::None, HitTarget::HeaderHandle);
    }
    if let Ok(Some(_)) = element.closest(&format!(".{HEADER_TITLE_CLASS}")) {
        return column("th").map_or(HitTarget::None, HitTarget::HeaderLabel);
    }
    if let Some(col) = column("th") {
        return HitTarget::HeaderCell(col);
    }
    match (data_index(element, "tr", "data-row"), column("td")) {
        (Some(row), Some(column)) => HitTarget::Cell { row, column },
        _ => HitTarget::None,
    }
}

fn pointer_event(event: &MouseEvent, scroller: &HtmlElement) -> PointerEvent {
    let rect = scroller.get_bounding_client_rect();
    PointerEvent {
        x: f64::from(event.client_x()) - rect.left() + f64::from(scroller.scroll_left()),
        y: f64::from(event.client_y()) - rect.top(),
        ctrl: event.ctrl_key(),
        shift: event.shift_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

impl Elements {
    fn build(document: Document, wrapper: &Element) -> Result<Self> {
        let scroller = create_html(&document, "div", SCROLLER_CLASS)?;
        let style = scroller.style();
        let _ = style.set_property("overflow", "auto");
        let _ = style.set_property("height", "100%");
        let _ = style.set_property("position", "relative");

        let table = create_html(&document, "table", "")?;
        let _ = table.style().set_property("table-layout", "fixed");
        let _ = table.style().set_property("border-collapse", "collapse");
        let colgroup = create(&document, "colgroup", "")?;
        let thead = create(&document, "thead", "")?;
        let header_row = create(&document, "tr", HEADER_ROW_CLASS)?;
        let tbody = create(&document, "tbody", "")?;

        thead.append_child(&header_row)?;
        table.append_child(&colgroup)?;
        table.append_child(&thead)?;
        table.append_child(&tbody)?;
        scroller.append_child(&table)?;
        wrapper.append_child(&scroller)?;

        Ok(Self {
            document,
            scroller,
            table,
            colgroup,
            header_row,
            tbody,
        })
    }

    fn render_header(&self, header: &[HeaderCellView], total_width: u32) -> Result<()> {
        let doc = &self.document;
        let _ = self
            .table
            .style()
            .set_property("width", &format!("{total_width}px"));

        self.colgroup.set_inner_html("");
        for cell in header {
            let col = create(doc, "col", "")?;
            col.set_attribute("style", &format!("width: {}px", cell.width))?;
            self.colgroup.append_child(&col)?;
        }

        self.header_row.set_inner_html("");
        for (i, cell) in header.iter().enumerate() {
            let th = create_html(doc, "th", HEADER_CELL_CLASS)?;
            th.set_attribute("data-col", &i.to_string())?;
            let style = th.style();
            let _ = style.set_property("height", &format!("{}px", cell.height));
            let _ = style.set_property("cursor", cell.cursor.as_css());
            let _ = style.set_property("position", "sticky");
            let _ = style.set_property("top", "0");

            let title = create(doc, "span", HEADER_TITLE_CLASS)?;
            set_content(&title, &cell.label);
            th.append_child(&title)?;

            if let Some(order) = cell.sort_indicator {
                let icon = create(
                    doc,
                    "span",
                    &format!("{SORT_ICON_CLASS} _{}", order.icon_name()),
                )?;
                icon.set_text_content(Some(&order.glyph().to_string()));
                th.append_child(&icon)?;
            }
            if let Some(handle) = cell.handle {
                let element = create(doc, "div", &handle.class_name())?;
                th.append_child(&element)?;
            }
            self.header_row.append_child(&th)?;
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn spacer(&self, height: f64, columns: usize) -> Result<Element> {
        let tr = create(&self.document, "tr", SPACER_CLASS)?;
        let td = create(&self.document, "td", "")?;
        td.set_attribute("colspan", &columns.max(1).to_string())?;
        td.set_attribute("style", &format!("height: {}px; padding: 0", height as i64))?;
        tr.append_child(&td)?;
        Ok(tr)
    }

    fn render_body(&self, body: &BodyView, columns: usize) -> Result<()> {
        let doc = &self.document;
        self.tbody.set_inner_html("");
        if body.padding_top > 0.0 {
            self.tbody
                .append_child(&self.spacer(body.padding_top, columns)?)?;
        }
        for row in &body.rows {
            let tr = create(doc, "tr", &row.class_name)?;
            tr.set_attribute("data-row", &row.index.to_string())?;
            tr.set_attribute("style", &format!("height: {}px", row.height))?;
            for (i, cell) in row.cells.iter().enumerate() {
                let td = create(doc, "td", CELL_CLASS)?;
                td.set_attribute("data-col", &i.to_string())?;
                if cell.clickable {
                    td.set_attribute("style", "cursor: pointer")?;
                }
                set_content(&td, &cell.content);
                tr.append_child(&td)?;
            }
            self.tbody.append_child(&tr)?;
        }
        if body.padding_bottom > 0.0 {
            self.tbody
                .append_child(&self.spacer(body.padding_bottom, columns)?)?;
        }
        Ok(())
    }
}

fn render_header<R>(state: &Rc<RefCell<Shared<R>>>, elements: &Elements) {
    let Ok(s) = state.try_borrow() else {
        return;
    };
    let (header, total) = s.header();
    drop(s);
    if let Err(e) = elements.render_header(&header, total) {
        log::warn!("header render failed: {e}");
    }
}

fn render_body<R>(state: &Rc<RefCell<Shared<R>>>, elements: &Elements) {
    let Ok(s) = state.try_borrow() else {
        return;
    };
    let body = s.body();
    let columns = s.grid.columns().len();
    drop(s);
    if let Err(e) = elements.render_body(&body, columns) {
        log::warn!("body render failed: {e}");
    }
}

impl<R: 'static> DomGrid<R> {
    /// Mount `grid` over `rows` into `wrapper`.
    ///
    /// # Errors
    /// Returns `GridError::Dom` if elements or listeners cannot be created.
    pub fn mount(wrapper: &HtmlElement, grid: Grid<R>, rows: Vec<R>) -> Result<Self> {
        console_error_panic_hook::set_once();
        init_console_logger();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GridError::Dom("no document".into()))?;
        let elements = Rc::new(Elements::build(document.clone(), wrapper)?);
        let state = Rc::new(RefCell::new(Shared { grid, rows }));

        {
            let mut s = state.borrow_mut();
            let height = f64::from(elements.scroller.client_height());
            s.grid.set_viewport_height(height);
        }
        render_header(&state, &elements);
        render_body(&state, &elements);

        let mut listeners = Vec::new();
        let scroller: &EventTarget = elements.scroller.as_ref();
        let document_target: &EventTarget = document.as_ref();

        // Mouse down: start a resize session on a handle
        {
            let state = Rc::clone(&state);
            let elements = Rc::clone(&elements);
            listeners.push(Listener::new(scroller, "mousedown", move |event| {
                let Some(target) = event_element(&event).map(|e| classify(&e)) else {
                    return;
                };
                let started = match state.try_borrow_mut() {
                    Ok(mut s) => s.grid.pointer_down(target),
                    Err(_) => false,
                };
                if started {
                    event.prevent_default();
                    set_cursor(&elements.document, Cursor::ColResize);
                    render_header(&state, &elements);
                }
            })?);
        }

        // Mouse move (document): follow the pointer while resizing
        {
            let state = Rc::clone(&state);
            let elements = Rc::clone(&elements);
            listeners.push(Listener::new(document_target, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Ok(s) = state.try_borrow() else {
                    return;
                };
                let Some(column) = s.grid.resizing_column() else {
                    return;
                };
                drop(s);
                let selector = format!("th[data-col=\"{column}\"]");
                let Ok(Some(th)) = elements.header_row.query_selector(&selector) else {
                    return;
                };
                let left = th.get_bounding_client_rect().left();
                let changed = match state.try_borrow_mut() {
                    Ok(mut s) => s.grid.pointer_move(f64::from(event.client_x()), left),
                    Err(_) => None,
                };
                if changed.is_some() {
                    render_header(&state, &elements);
                }
            })?);
        }

        // Mouse up (document): end the resize session
        {
            let state = Rc::clone(&state);
            let elements = Rc::clone(&elements);
            listeners.push(Listener::new(document_target, "mouseup", move |_event| {
                let ended = match state.try_borrow_mut() {
                    Ok(mut s) => s.grid.pointer_up(),
                    Err(_) => false,
                };
                if ended {
                    set_cursor(&elements.document, Cursor::Auto);
                    render_header(&state, &elements);
                }
            })?);
        }

        // Click: sort on header labels, report body cell clicks
        {
            let state = Rc::clone(&state);
            let elements = Rc::clone(&elements);
            listeners.push(Listener::new(scroller, "click", move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(target) = event_element(&event).map(|e| classify(&e)) else {
                    return;
                };
                let pointer = pointer_event(mouse, &elements.scroller);
                let sorted = {
                    let Ok(mut s) = state.try_borrow_mut() else {
                        return;
                    };
                    let Shared { grid, rows } = &mut *s;
                    matches!(
                        grid.click(target, &pointer, rows),
                        Some(super::GridAction::Sorted(_))
                    )
                };
                if sorted {
                    render_header(&state, &elements);
                    render_body(&state, &elements);
                }
            })?);
        }

        // Scroll: remount the visible window
        {
            let state = Rc::clone(&state);
            let elements = Rc::clone(&elements);
            listeners.push(Listener::new(scroller, "scroll", move |_event| {
                let top = f64::from(elements.scroller.scroll_top());
                match state.try_borrow_mut() {
                    Ok(mut s) => {
                        let count = s.rows.len();
                        s.grid.set_scroll_offset(top, count);
                    }
                    Err(_) => return,
                }
                render_body(&state, &elements);
            })?);
        }

        // Container resize: reflow widths to the observed width
        let observer_closure = {
            let state = Rc::clone(&state);
            let elements = Rc::clone(&elements);
            Closure::wrap(Box::new(move |entries: js_sys::Array| {
                let Some(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>().ok() else {
                    return;
                };
                let width = entry.content_rect().width().floor().max(0.0);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let width = width.min(f64::from(u32::MAX)) as u32;
                {
                    let Ok(mut s) = state.try_borrow_mut() else {
                        return;
                    };
                    let scroller = &elements.scroller;
                    s.grid
                        .measure_scrollbar(scroller.offset_width(), scroller.client_width());
                    s.grid.observe_container_width(width);
                    s.grid
                        .set_viewport_height(f64::from(scroller.client_height()));
                }
                render_header(&state, &elements);
                render_body(&state, &elements);
            }) as Box<dyn FnMut(js_sys::Array)>)
        };
        let observer = ResizeObserver::new(observer_closure.as_ref().unchecked_ref())?;
        observer.observe(wrapper);

        log::debug!("grid mounted");
        Ok(Self {
            state,
            elements,
            listeners,
            observer,
            _observer_closure: observer_closure,
        })
    }

    /// Replace the row collection and remount the visible window.
    ///
    /// A vertical scrollbar brought in by the new rows is reserved and the
    /// columns reflowed around it.
    pub fn set_rows(&self, rows: Vec<R>) {
        if let Ok(mut s) = self.state.try_borrow_mut() {
            s.rows = rows;
            let count = s.rows.len();
            let offset = s.grid.viewport().scroll_offset();
            s.grid.set_scroll_offset(offset, count);
        }
        render_body(&self.state, &self.elements);

        let reflowed = match self.state.try_borrow_mut() {
            Ok(mut s) => {
                let scroller = &self.elements.scroller;
                s.grid
                    .remeasure_scrollbar(scroller.offset_width(), scroller.client_width())
            }
            Err(_) => false,
        };
        if reflowed {
            render_header(&self.state, &self.elements);
            render_body(&self.state, &self.elements);
        }
    }

    pub fn row_count(&self) -> usize {
        self.state.try_borrow().map_or(0, |s| s.rows.len())
    }

    /// Scroll so row `index` is at the top of the body.
    #[allow(clippy::cast_possible_truncation)]
    pub fn scroll_to_index(&self, index: usize) {
        let offset = {
            let Ok(mut s) = self.state.try_borrow_mut() else {
                return;
            };
            let count = s.rows.len();
            s.grid.scroll_to_index(index, count);
            s.grid.viewport().scroll_offset()
        };
        self.elements.scroller.set_scroll_top(offset.round() as i32);
        render_body(&self.state, &self.elements);
    }

    /// Sort by `key` as if its header label had been clicked.
    ///
    /// # Errors
    /// Returns `GridError::UnknownColumn` for a key outside the schema.
    pub fn sort_by_key(&self, key: &str) -> Result<Option<SortState>> {
        let result = {
            let mut s = self
                .state
                .try_borrow_mut()
                .map_err(|_| GridError::Dom("grid is busy".into()))?;
            let Shared { grid, rows } = &mut *s;
            grid.sort_by_key(key, rows)?
        };
        render_header(&self.state, &self.elements);
        render_body(&self.state, &self.elements);
        Ok(result)
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.state
            .try_borrow()
            .ok()
            .and_then(|s| s.grid.sort_state().cloned())
    }

    pub fn column_widths(&self) -> HashMap<String, u32> {
        self.state
            .try_borrow()
            .map(|s| s.grid.widths().to_map())
            .unwrap_or_default()
    }
}

impl<R: 'static> Drop for DomGrid<R> {
    fn drop(&mut self) {
        self.observer.disconnect();
        self.listeners.clear();
        set_cursor(&self.elements.document, Cursor::Auto);
        self.elements.scroller.remove();
        log::debug!("grid unmounted");
    }
}
