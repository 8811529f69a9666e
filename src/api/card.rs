//! Message card builder
//!
//! Cards are sent as `interactive` messages. Every element serializes with
//! its own `tag`, and [`MessageCard::to_value`] checks the rules the
//! platform enforces before anything leaves the process: required fields,
//! non-empty lists, and `url` / `multi_url` being mutually exclusive.

use super::message::MessageContent;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

trait Validate {
    fn validate(&self) -> Result<()>;
}

fn require(ok: bool, message: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_card(message))
    }
}

fn validate_all<T: Validate>(items: &[T]) -> Result<()> {
    items.iter().try_for_each(Validate::validate)
}

// ============================================================================
// Card root
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CardConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    pub elements: Vec<CardElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_link: Option<CardUrl>,
}

impl MessageCard {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: CardConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn header(mut self, header: CardHeader) -> Self {
        self.header = Some(header);
        self
    }

    #[must_use]
    pub fn element(mut self, element: impl Into<CardElement>) -> Self {
        self.elements.push(element.into());
        self
    }

    /// Where a tap on the card body leads
    #[must_use]
    pub fn card_link(mut self, link: CardUrl) -> Self {
        self.card_link = Some(link);
        self
    }

    /// Check the card and render it as JSON
    pub fn to_value(&self) -> Result<Value> {
        self.validate()?;
        serde_json::to_value(self).map_err(Error::JsonParse)
    }

    /// Check the card and wrap it as a message body
    pub fn into_content(self) -> Result<MessageContent> {
        Ok(MessageContent::Interactive(self.to_value()?))
    }
}

impl Validate for MessageCard {
    fn validate(&self) -> Result<()> {
        require(!self.elements.is_empty(), "card elements are required")?;
        validate_all(&self.elements)?;
        if let Some(link) = &self.card_link {
            link.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_forward: Option<bool>,
    /// Update the card for every recipient, not just the one who acted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_multi: Option<bool>,
}

/// Header color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderTemplate {
    Blue,
    Wathet,
    Turquoise,
    Green,
    Yellow,
    Orange,
    Red,
    Carmine,
    Violet,
    Purple,
    Indigo,
    Grey,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardHeader {
    pub title: PlainText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<HeaderTemplate>,
}

impl CardHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: PlainText::new(title),
            template: None,
        }
    }

    #[must_use]
    pub fn template(mut self, template: HeaderTemplate) -> Self {
        self.template = Some(template);
        self
    }
}

/// A link with per-platform overrides
///
/// Platforms without an override open `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardUrl {
    pub url: String,
    pub android_url: String,
    pub ios_url: String,
    pub pc_url: String,
}

impl CardUrl {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            android_url: url.clone(),
            ios_url: url.clone(),
            pc_url: url.clone(),
            url,
        }
    }

    #[must_use]
    pub fn android(mut self, url: impl Into<String>) -> Self {
        self.android_url = url.into();
        self
    }

    #[must_use]
    pub fn ios(mut self, url: impl Into<String>) -> Self {
        self.ios_url = url.into();
        self
    }

    #[must_use]
    pub fn pc(mut self, url: impl Into<String>) -> Self {
        self.pc_url = url.into();
        self
    }
}

impl Validate for CardUrl {
    fn validate(&self) -> Result<()> {
        require(!self.url.is_empty(), "url is required")
    }
}

// ============================================================================
// Text
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename = "plain_text")]
pub struct PlainText {
    pub content: String,
    /// Clamp to this many lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
}

impl PlainText {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            lines: None,
        }
    }
}

/// Text in the platform's markdown dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename = "lark_md")]
pub struct LarkMd {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CardText {
    Plain(PlainText),
    LarkMd(LarkMd),
}

impl CardText {
    pub fn plain(content: impl Into<String>) -> Self {
        CardText::Plain(PlainText::new(content))
    }

    pub fn lark_md(content: impl Into<String>) -> Self {
        CardText::LarkMd(LarkMd {
            content: content.into(),
        })
    }
}

impl From<PlainText> for CardText {
    fn from(text: PlainText) -> Self {
        CardText::Plain(text)
    }
}

// ============================================================================
// Content elements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardElement {
    Div(Div),
    Markdown(Markdown),
    Hr(Hr),
    Img(Image),
    Note(Note),
    Action(Action),
    ColumnSet(ColumnSet),
}

impl Validate for CardElement {
    fn validate(&self) -> Result<()> {
        match self {
            CardElement::Div(div) => div.validate(),
            CardElement::Markdown(markdown) => markdown.validate(),
            CardElement::Hr(_) => Ok(()),
            CardElement::Img(image) => image.validate(),
            CardElement::Note(note) => note.validate(),
            CardElement::Action(action) => action.validate(),
            CardElement::ColumnSet(column_set) => column_set.validate(),
        }
    }
}

macro_rules! into_card_element {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for CardElement {
                fn from(element: $ty) -> Self {
                    CardElement::$variant(element)
                }
            }
        )*
    };
}

into_card_element!(
    Div(Div),
    Markdown(Markdown),
    Hr(Hr),
    Img(Image),
    Note(Note),
    Action(Action),
    ColumnSet(ColumnSet),
);

/// A text block, optionally with short fields laid out side by side
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "div")]
pub struct Div {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<CardText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<DivField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Box<CardExtra>>,
}

impl Div {
    pub fn text(text: CardText) -> Self {
        Self {
            text: Some(text),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn field(mut self, field: DivField) -> Self {
        self.fields.push(field);
        self
    }

    /// Attach an image or interactive widget on the right
    #[must_use]
    pub fn extra(mut self, extra: impl Into<CardExtra>) -> Self {
        self.extra = Some(Box::new(extra.into()));
        self
    }
}

impl Validate for Div {
    fn validate(&self) -> Result<()> {
        require(
            self.text.is_some() || !self.fields.is_empty(),
            "div needs text or fields",
        )?;
        match self.extra.as_deref() {
            Some(extra) => extra.validate(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_short: Option<bool>,
    pub text: CardText,
}

impl DivField {
    pub fn new(text: CardText, is_short: bool) -> Self {
        Self {
            is_short: Some(is_short),
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Markdown block; `href` maps `[text]($name)` placeholders to links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename = "markdown")]
pub struct Markdown {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub href: BTreeMap<String, CardUrl>,
}

impl Markdown {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn href(mut self, name: impl Into<String>, url: CardUrl) -> Self {
        self.href.insert(name.into(), url);
        self
    }
}

impl Validate for Markdown {
    fn validate(&self) -> Result<()> {
        self.href.values().try_for_each(Validate::validate)
    }
}

/// Horizontal rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename = "hr")]
pub struct Hr {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageMode {
    CropCenter,
    FitHorizontal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename = "img")]
pub struct Image {
    pub img_key: String,
    pub alt: PlainText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<CardText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_width: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ImageMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<bool>,
}

impl Image {
    pub fn new(img_key: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            img_key: img_key.into(),
            alt: PlainText::new(alt),
            title: None,
            custom_width: None,
            compact_width: None,
            mode: None,
            preview: None,
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: ImageMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl Validate for Image {
    fn validate(&self) -> Result<()> {
        require(!self.img_key.is_empty(), "img_key is required")
    }
}

/// Small grey footnote made of text and icons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename = "note")]
pub struct Note {
    pub elements: Vec<NoteElement>,
}

impl Note {
    pub fn new(elements: Vec<NoteElement>) -> Self {
        Self { elements }
    }
}

impl Validate for Note {
    fn validate(&self) -> Result<()> {
        require(!self.elements.is_empty(), "note elements are required")?;
        validate_all(&self.elements)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NoteElement {
    Text(CardText),
    Img(Image),
}

impl Validate for NoteElement {
    fn validate(&self) -> Result<()> {
        match self {
            NoteElement::Text(_) => Ok(()),
            NoteElement::Img(image) => image.validate(),
        }
    }
}

impl From<CardText> for NoteElement {
    fn from(text: CardText) -> Self {
        NoteElement::Text(text)
    }
}

impl From<Image> for NoteElement {
    fn from(image: Image) -> Self {
        NoteElement::Img(image)
    }
}

// ============================================================================
// Layout
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexMode {
    None,
    Stretch,
    Flow,
    Bisect,
    Trisect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundStyle {
    Default,
    Grey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalSpacing {
    Default,
    Small,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "column_set")]
pub struct ColumnSet {
    /// How columns wrap on narrow screens
    pub flex_mode: FlexMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_style: Option<BackgroundStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_spacing: Option<HorizontalSpacing>,
    pub columns: Vec<Column>,
}

impl ColumnSet {
    pub fn new(flex_mode: FlexMode) -> Self {
        Self {
            flex_mode,
            background_style: None,
            horizontal_spacing: None,
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

impl Validate for ColumnSet {
    fn validate(&self) -> Result<()> {
        validate_all(&self.columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidth {
    Auto,
    Weighted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "column")]
pub struct Column {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    pub elements: Vec<CardElement>,
}

impl Column {
    pub fn new(elements: Vec<CardElement>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    /// Share the row by `weight`; implies weighted width
    #[must_use]
    pub fn weight(mut self, weight: u32) -> Self {
        self.width = Some(ColumnWidth::Weighted);
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }
}

impl Validate for Column {
    fn validate(&self) -> Result<()> {
        validate_all(&self.elements)
    }
}

// ============================================================================
// Interactive widgets
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionLayout {
    Bisected,
    Trisection,
    Flow,
}

/// A row of interactive widgets
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "action")]
pub struct Action {
    pub actions: Vec<ActionElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<ActionLayout>,
}

impl Action {
    pub fn new(actions: Vec<ActionElement>) -> Self {
        Self {
            actions,
            layout: None,
        }
    }

    #[must_use]
    pub fn layout(mut self, layout: ActionLayout) -> Self {
        self.layout = Some(layout);
        self
    }
}

impl Validate for Action {
    fn validate(&self) -> Result<()> {
        require(!self.actions.is_empty(), "actions are required")?;
        validate_all(&self.actions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionElement {
    Button(Button),
    SelectStatic(SelectStatic),
    SelectPerson(SelectPerson),
    Overflow(Overflow),
    DatePicker(DatePicker),
    PickerTime(PickerTime),
    PickerDatetime(PickerDatetime),
}

impl Validate for ActionElement {
    fn validate(&self) -> Result<()> {
        match self {
            ActionElement::Button(button) => button.validate(),
            ActionElement::SelectStatic(select) => select.validate(),
            ActionElement::SelectPerson(select) => select.validate(),
            ActionElement::Overflow(overflow) => overflow.validate(),
            ActionElement::DatePicker(picker) => picker.validate(),
            ActionElement::PickerTime(picker) => picker.validate(),
            ActionElement::PickerDatetime(picker) => picker.validate(),
        }
    }
}

macro_rules! into_action_element {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ActionElement {
                fn from(element: $ty) -> Self {
                    ActionElement::$variant(element)
                }
            }

            impl From<$ty> for CardExtra {
                fn from(element: $ty) -> Self {
                    CardExtra::Action(ActionElement::$variant(element))
                }
            }
        )*
    };
}

into_action_element!(
    Button(Button),
    SelectStatic(SelectStatic),
    SelectPerson(SelectPerson),
    Overflow(Overflow),
    DatePicker(DatePicker),
    PickerTime(PickerTime),
    PickerDatetime(PickerDatetime),
);

/// What may sit in a div's `extra` slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardExtra {
    Img(Image),
    Action(ActionElement),
}

impl Validate for CardExtra {
    fn validate(&self) -> Result<()> {
        match self {
            CardExtra::Img(image) => image.validate(),
            CardExtra::Action(action) => action.validate(),
        }
    }
}

impl From<Image> for CardExtra {
    fn from(image: Image) -> Self {
        CardExtra::Img(image)
    }
}


/// Second dialog shown before an action fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirm {
    pub title: PlainText,
    pub text: PlainText,
}

impl Confirm {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: PlainText::new(title),
            text: PlainText::new(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    #[default]
    Default,
    Primary,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "button")]
pub struct Button {
    pub text: CardText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_url: Option<CardUrl>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub button_type: Option<ButtonType>,
    /// Echoed back to the callback when clicked
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub value: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<Confirm>,
}

impl Button {
    pub fn new(text: CardText) -> Self {
        Self {
            text,
            url: None,
            multi_url: None,
            button_type: None,
            value: Map::new(),
            confirm: None,
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn multi_url(mut self, url: CardUrl) -> Self {
        self.multi_url = Some(url);
        self
    }

    #[must_use]
    pub fn button_type(mut self, button_type: ButtonType) -> Self {
        self.button_type = Some(button_type);
        self
    }

    #[must_use]
    pub fn value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.value.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn confirm(mut self, confirm: Confirm) -> Self {
        self.confirm = Some(confirm);
        self
    }
}

impl Validate for Button {
    fn validate(&self) -> Result<()> {
        require(
            self.url.is_none() || self.multi_url.is_none(),
            "button url and multi_url are mutually exclusive",
        )?;
        match &self.multi_url {
            Some(url) => url.validate(),
            None => Ok(()),
        }
    }
}

/// One entry of a select menu or overflow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<PlainText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_url: Option<CardUrl>,
}

impl CardOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: Some(PlainText::new(text)),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A person option; the platform renders the name from the id
    pub fn person(user_id: impl Into<String>) -> Self {
        Self {
            value: Some(user_id.into()),
            ..Self::default()
        }
    }
}

impl Validate for CardOption {
    fn validate(&self) -> Result<()> {
        require(
            self.url.is_none() || self.multi_url.is_none(),
            "option url and multi_url are mutually exclusive",
        )
    }
}

fn validate_labeled_options(options: &[CardOption], widget: &str) -> Result<()> {
    require(!options.is_empty(), &format!("{widget} options are required"))?;
    for option in options {
        require(option.text.is_some(), &format!("{widget} option text is required"))?;
        option.validate()?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectMenu {
    pub placeholder: PlainText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_option: Option<String>,
    pub options: Vec<CardOption>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub value: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<Confirm>,
}

impl SelectMenu {
    pub fn new(placeholder: impl Into<String>, options: Vec<CardOption>) -> Self {
        Self {
            placeholder: PlainText::new(placeholder),
            initial_option: None,
            options,
            value: Map::new(),
            confirm: None,
        }
    }
}

/// Drop-down of fixed options
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "select_static")]
pub struct SelectStatic {
    #[serde(flatten)]
    pub menu: SelectMenu,
}

impl Validate for SelectStatic {
    fn validate(&self) -> Result<()> {
        validate_labeled_options(&self.menu.options, "select_static")
    }
}

/// Drop-down of people
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "select_person")]
pub struct SelectPerson {
    #[serde(flatten)]
    pub menu: SelectMenu,
}

impl Validate for SelectPerson {
    fn validate(&self) -> Result<()> {
        require(
            !self.menu.options.is_empty(),
            "select_person options are required",
        )?;
        validate_all(&self.menu.options)
    }
}

/// The "..." menu
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "overflow")]
pub struct Overflow {
    pub options: Vec<CardOption>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub value: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<Confirm>,
}

impl Overflow {
    pub fn new(options: Vec<CardOption>) -> Self {
        Self {
            options,
            value: Map::new(),
            confirm: None,
        }
    }
}

impl Validate for Overflow {
    fn validate(&self) -> Result<()> {
        validate_labeled_options(&self.options, "overflow")
    }
}

/// Options shared by the three pickers
///
/// Formats: `yyyy-MM-dd`, `HH:mm` and `yyyy-MM-dd HH:mm`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PickerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<PlainText>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub value: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<Confirm>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "date_picker")]
pub struct DatePicker {
    #[serde(flatten)]
    pub options: PickerOptions,
}

impl Validate for DatePicker {
    fn validate(&self) -> Result<()> {
        require(
            self.options.initial_date.is_some() || self.options.placeholder.is_some(),
            "date_picker needs initial_date or placeholder",
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "picker_time")]
pub struct PickerTime {
    #[serde(flatten)]
    pub options: PickerOptions,
}

impl Validate for PickerTime {
    fn validate(&self) -> Result<()> {
        require(
            self.options.initial_time.is_some() || self.options.placeholder.is_some(),
            "picker_time needs initial_time or placeholder",
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "tag", rename = "picker_datetime")]
pub struct PickerDatetime {
    #[serde(flatten)]
    pub options: PickerOptions,
}

impl Validate for PickerDatetime {
    fn validate(&self) -> Result<()> {
        require(
            self.options.initial_datetime.is_some() || self.options.placeholder.is_some(),
            "picker_datetime needs initial_datetime or placeholder",
        )
    }
}
