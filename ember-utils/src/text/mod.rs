//! This module contains everything related to text components.
//!
//! Text travels as JSON. Any JSON form the client accepts is read (plain
//! strings, arrays and objects). Keys the model does not interpret, such as
//! click and hover events, are carried along untouched. A component parsed
//! with [`TextComponent::from_json`] and left unchanged is written back as the
//! exact JSON it was read from; anything else is written in object form.

use std::{fmt, sync::Arc};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, DeserializeOwned, Visitor, value::MapAccessDeserializer},
    ser::SerializeMap,
};
use serde_json::{Map, Value};

/// A rich text component: some content, its style and child components.
#[derive(Debug, Clone, Default)]
pub struct TextComponent {
    /// What this component displays.
    pub content: TextContent,
    /// How this component and, unless overridden, its children are styled.
    pub style: Style,
    /// Child components rendered after this one.
    pub extra: Vec<TextComponent>,
    /// Every other key of the JSON object, e.g. `clickEvent`, `hoverEvent`
    /// or `shadow_color`. Written back as read.
    pub other: Map<String, Value>,
    source: Option<Arc<Source>>,
}

/// The JSON a component was parsed from, with the value it parsed to.
struct Source {
    json: Box<str>,
    parsed: TextComponent,
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.json)
    }
}

/// The content of a [`TextComponent`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextContent {
    /// Literal text.
    Text {
        /// The text to display.
        text: String,
    },
    /// A translation key resolved by the client, with arguments.
    Translate {
        /// The translation key.
        translate: String,
        /// Shown when the client has no translation for the key.
        fallback: Option<String>,
        /// Arguments substituted into the translated string.
        with: Vec<TextComponent>,
    },
    /// The name of the key bound to a control.
    Keybind {
        /// The keybind identifier, e.g. `key.jump`.
        keybind: String,
    },
    /// A scoreboard value.
    Score(ScoreContent),
    /// The names of the entities matched by a selector.
    Selector {
        /// The selector, e.g. `@p`.
        selector: String,
        /// Placed between names when several entities match.
        separator: Option<Box<TextComponent>>,
    },
    /// Values read from NBT.
    Nbt {
        /// The NBT path.
        nbt: String,
        /// Where the NBT is read from.
        source: NbtSource,
        /// Whether the values are themselves parsed as text components.
        interpret: Option<bool>,
        /// Placed between values when the path matches several.
        separator: Option<Box<TextComponent>>,
    },
}

impl Default for TextContent {
    fn default() -> Self {
        Self::Text {
            text: String::new(),
        }
    }
}

/// The `score` object of a score component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreContent {
    /// The score holder, a name or a selector.
    pub name: String,
    /// The objective to read.
    pub objective: String,
    /// Any other keys, such as the `value` older versions send.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Where an NBT component reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NbtSource {
    /// A block entity at these coordinates.
    Block(String),
    /// The entity matched by this selector.
    Entity(String),
    /// A command storage.
    Storage(String),
}

impl NbtSource {
    fn entry(&self) -> (&'static str, &str) {
        match self {
            Self::Block(pos) => ("block", pos.as_str()),
            Self::Entity(selector) => ("entity", selector.as_str()),
            Self::Storage(id) => ("storage", id.as_str()),
        }
    }
}

/// Formatting of a [`TextComponent`]. Unset fields inherit from the parent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    /// A named color or `#RRGGBB`.
    pub color: Option<String>,
    /// A font resource location.
    pub font: Option<String>,
    /// Bold.
    pub bold: Option<bool>,
    /// Italic.
    pub italic: Option<bool>,
    /// Underlined.
    pub underlined: Option<bool>,
    /// Struck through.
    pub strikethrough: Option<bool>,
    /// Rendered as constantly changing random glyphs.
    pub obfuscated: Option<bool>,
    /// Text inserted into the chat box when the component is shift-clicked.
    pub insertion: Option<String>,
}

impl Style {
    fn take_from(object: &mut Map<String, Value>) -> serde_json::Result<Self> {
        Ok(Self {
            color: take(object, "color")?,
            font: take(object, "font")?,
            bold: take(object, "bold")?,
            italic: take(object, "italic")?,
            underlined: take(object, "underlined")?,
            strikethrough: take(object, "strikethrough")?,
            obfuscated: take(object, "obfuscated")?,
            insertion: take(object, "insertion")?,
        })
    }

    fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        optional_entry(map, "color", self.color.as_ref())?;
        optional_entry(map, "font", self.font.as_ref())?;
        optional_entry(map, "bold", self.bold.as_ref())?;
        optional_entry(map, "italic", self.italic.as_ref())?;
        optional_entry(map, "underlined", self.underlined.as_ref())?;
        optional_entry(map, "strikethrough", self.strikethrough.as_ref())?;
        optional_entry(map, "obfuscated", self.obfuscated.as_ref())?;
        optional_entry(map, "insertion", self.insertion.as_ref())
    }
}

impl TextComponent {
    /// A component showing literal text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: TextContent::Text { text: text.into() },
            ..Default::default()
        }
    }

    /// A component the client translates using `key`.
    #[must_use]
    pub fn translate(key: impl Into<String>) -> Self {
        Self::translate_with(key, Vec::new())
    }

    /// A translated component with arguments.
    #[must_use]
    pub fn translate_with(key: impl Into<String>, with: Vec<TextComponent>) -> Self {
        Self {
            content: TextContent::Translate {
                translate: key.into(),
                fallback: None,
                with,
            },
            ..Default::default()
        }
    }

    /// A component showing the key bound to `keybind`.
    #[must_use]
    pub fn keybind(keybind: impl Into<String>) -> Self {
        Self {
            content: TextContent::Keybind {
                keybind: keybind.into(),
            },
            ..Default::default()
        }
    }

    /// A component showing the names of the entities `selector` matches.
    #[must_use]
    pub fn selector(selector: impl Into<String>) -> Self {
        Self {
            content: TextContent::Selector {
                selector: selector.into(),
                separator: None,
            },
            ..Default::default()
        }
    }

    /// Sets the color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.style.color = Some(color.into());
        self
    }

    /// Sets whether the text is bold.
    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.style.bold = Some(bold);
        self
    }

    /// Sets whether the text is italic.
    #[must_use]
    pub fn italic(mut self, italic: bool) -> Self {
        self.style.italic = Some(italic);
        self
    }

    /// Appends a child component.
    #[must_use]
    pub fn append(mut self, child: impl Into<TextComponent>) -> Self {
        self.extra.push(child.into());
        self
    }

    /// Concatenates the content of this component and all its children,
    /// ignoring style. Translation keys, keybinds, score holders, selectors
    /// and NBT paths are shown raw.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match &self.content {
            TextContent::Text { text } => out.push_str(text),
            TextContent::Translate { translate, .. } => out.push_str(translate),
            TextContent::Keybind { keybind } => out.push_str(keybind),
            TextContent::Score(score) => out.push_str(&score.name),
            TextContent::Selector { selector, .. } => out.push_str(selector),
            TextContent::Nbt { nbt, .. } => out.push_str(nbt),
        }
        for child in &self.extra {
            child.push_plain_text(out);
        }
    }

    /// Returns a copy with `f` applied to every literal text, including
    /// children, translation arguments and separators. Everything else is
    /// kept.
    #[must_use]
    pub fn map_literals(&self, f: &impl Fn(&str) -> String) -> Self {
        let map_separator = |separator: &Option<Box<TextComponent>>| {
            separator
                .as_ref()
                .map(|separator| Box::new(separator.map_literals(f)))
        };

        let content = match &self.content {
            TextContent::Text { text } => TextContent::Text { text: f(text) },
            TextContent::Translate {
                translate,
                fallback,
                with,
            } => TextContent::Translate {
                translate: translate.clone(),
                fallback: fallback.clone(),
                with: with.iter().map(|arg| arg.map_literals(f)).collect(),
            },
            TextContent::Selector {
                selector,
                separator,
            } => TextContent::Selector {
                selector: selector.clone(),
                separator: map_separator(separator),
            },
            TextContent::Nbt {
                nbt,
                source,
                interpret,
                separator,
            } => TextContent::Nbt {
                nbt: nbt.clone(),
                source: source.clone(),
                interpret: *interpret,
                separator: map_separator(separator),
            },
            other @ (TextContent::Keybind { .. } | TextContent::Score(_)) => other.clone(),
        };

        Self {
            content,
            style: self.style.clone(),
            extra: self.extra.iter().map(|child| child.map_literals(f)).collect(),
            other: self.other.clone(),
            source: None,
        }
    }

    /// Serializes the component.
    ///
    /// A component from [`TextComponent::from_json`] that still equals what
    /// was parsed is written as the original JSON, byte for byte.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match &self.source {
            Some(source) if source.parsed == *self => Ok(source.json.to_string()),
            _ => serde_json::to_string(self),
        }
    }

    /// Parses a component from any JSON form and remembers `json` for
    /// [`TextComponent::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let parsed: Self = serde_json::from_str(json)?;
        let mut component = parsed.clone();
        component.source = Some(Arc::new(Source {
            json: json.into(),
            parsed,
        }));
        Ok(component)
    }

    fn from_object(mut object: Map<String, Value>) -> serde_json::Result<Self> {
        let content = TextContent::take_from(&mut object)?;
        let style = Style::take_from(&mut object)?;
        let extra = take(&mut object, "extra")?.unwrap_or_default();

        Ok(Self {
            content,
            style,
            extra,
            other: object,
            source: None,
        })
    }
}

impl TextContent {
    /// Removes the content keys from `object`. The first content kind
    /// present wins, checked in the order the client checks them.
    fn take_from(object: &mut Map<String, Value>) -> serde_json::Result<Self> {
        if let Some(text) = take(object, "text")? {
            return Ok(Self::Text { text });
        }
        if let Some(translate) = take(object, "translate")? {
            return Ok(Self::Translate {
                translate,
                fallback: take(object, "fallback")?,
                with: take(object, "with")?.unwrap_or_default(),
            });
        }
        if let Some(keybind) = take(object, "keybind")? {
            return Ok(Self::Keybind { keybind });
        }
        if let Some(score) = take(object, "score")? {
            return Ok(Self::Score(score));
        }
        if let Some(selector) = take(object, "selector")? {
            return Ok(Self::Selector {
                selector,
                separator: take(object, "separator")?,
            });
        }
        if let Some(nbt) = take(object, "nbt")? {
            let source = if let Some(pos) = take(object, "block")? {
                NbtSource::Block(pos)
            } else if let Some(selector) = take(object, "entity")? {
                NbtSource::Entity(selector)
            } else if let Some(id) = take(object, "storage")? {
                NbtSource::Storage(id)
            } else {
                return Err(de::Error::custom("nbt component without block, entity or storage"));
            };
            return Ok(Self::Nbt {
                nbt,
                source,
                interpret: take(object, "interpret")?,
                separator: take(object, "separator")?,
            });
        }
        Err(de::Error::custom("text component without content"))
    }

    fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match self {
            Self::Text { text } => map.serialize_entry("text", text),
            Self::Translate {
                translate,
                fallback,
                with,
            } => {
                map.serialize_entry("translate", translate)?;
                optional_entry(map, "fallback", fallback.as_ref())?;
                if with.is_empty() {
                    Ok(())
                } else {
                    map.serialize_entry("with", with)
                }
            }
            Self::Keybind { keybind } => map.serialize_entry("keybind", keybind),
            Self::Score(score) => map.serialize_entry("score", score),
            Self::Selector {
                selector,
                separator,
            } => {
                map.serialize_entry("selector", selector)?;
                optional_entry(map, "separator", separator.as_ref())
            }
            Self::Nbt {
                nbt,
                source,
                interpret,
                separator,
            } => {
                map.serialize_entry("nbt", nbt)?;
                let (key, value) = source.entry();
                map.serialize_entry(key, value)?;
                optional_entry(map, "interpret", interpret.as_ref())?;
                optional_entry(map, "separator", separator.as_ref())
            }
        }
    }
}

/// Removes `key` from `object` and deserializes it.
fn take<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    key: &str,
) -> serde_json::Result<Option<T>> {
    object.remove(key).map(serde_json::from_value).transpose()
}

fn optional_entry<M: SerializeMap, T: Serialize + ?Sized>(
    map: &mut M,
    key: &str,
    value: Option<&T>,
) -> Result<(), M::Error> {
    match value {
        Some(value) => map.serialize_entry(key, value),
        None => Ok(()),
    }
}

// The JSON a component was parsed from is not part of its value.
impl PartialEq for TextComponent {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.style == other.style
            && self.extra == other.extra
            && self.other == other.other
    }
}

impl fmt::Display for TextComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

impl From<&str> for TextComponent {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for TextComponent {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl Serialize for TextComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.content.serialize_entries(&mut map)?;
        self.style.serialize_entries(&mut map)?;
        if !self.extra.is_empty() {
            map.serialize_entry("extra", &self.extra)?;
        }
        for (key, value) in &self.other {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TextComponent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = TextComponent;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "a text component")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(TextComponent::text(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(TextComponent::text(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(TextComponent::text(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(TextComponent::text(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(TextComponent::text(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(TextComponent::text(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let Some(mut first) = seq.next_element::<TextComponent>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                while let Some(child) = seq.next_element::<TextComponent>()? {
                    first.extra.push(child);
                }
                Ok(first)
            }

            fn visit_map<A: de::MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let object = Map::deserialize(MapAccessDeserializer::new(map))?;
                TextComponent::from_object(object).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_shorthand() {
        let text = TextComponent::from_json("\"Dinnerbone\"").unwrap();
        assert_eq!(text, TextComponent::text("Dinnerbone"));
    }

    #[test]
    fn array_form_appends_children() {
        let text = TextComponent::from_json(r#"["Hello, ", {"text": "world", "bold": true}]"#)
            .unwrap();
        assert_eq!(
            text,
            TextComponent::text("Hello, ").append(TextComponent::text("world").bold(true))
        );
        assert_eq!(text.plain_text(), "Hello, world");
    }

    #[test]
    fn nested_shorthand_in_extra_and_with() {
        let text = TextComponent::from_json(
            r#"{"translate": "chat.type.text", "with": ["Steve", {"text": "hi"}], "extra": ["!"]}"#,
        )
        .unwrap();
        assert_eq!(
            text,
            TextComponent::translate_with(
                "chat.type.text",
                vec![TextComponent::text("Steve"), TextComponent::text("hi")]
            )
            .append("!")
        );
    }

    #[test]
    fn canonical_form_is_stable() {
        let text = TextComponent::text("Sheep")
            .color("gold")
            .italic(false)
            .append(TextComponent::keybind("key.jump"));
        let json = text.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"text":"Sheep","color":"gold","italic":false,"extra":[{"keybind":"key.jump"}]}"#
        );

        let parsed = TextComponent::from_json(&json).unwrap();
        assert_eq!(parsed, text);
        assert_eq!(parsed.to_json().unwrap(), json);
    }

    #[test]
    fn object_without_content_is_rejected() {
        assert!(TextComponent::from_json(r#"{"color": "red"}"#).is_err());
    }

    #[test]
    fn map_literals_keeps_keys_and_style() {
        let text = TextComponent::translate_with("chat.type.text", vec!["Steve".into()])
            .color("red")
            .append(TextComponent::keybind("key.jump"))
            .append("hi");

        let upper = text.map_literals(&|s: &str| s.to_uppercase());
        assert_eq!(upper.style, text.style);
        assert_eq!(upper.plain_text(), "chat.type.textkey.jumpHI");
        assert_eq!(
            upper.content,
            TextContent::Translate {
                translate: "chat.type.text".into(),
                fallback: None,
                with: vec!["STEVE".into()],
            }
        );
    }

    #[test]
    fn unchanged_component_keeps_its_bytes() {
        let json = r#"{"italic":false,"color":"white","text":"x"}"#;
        let text = TextComponent::from_json(json).unwrap();
        assert_eq!(text, TextComponent::text("x").color("white").italic(false));
        assert_eq!(text.to_json().unwrap(), json);
        assert_eq!(text.clone().to_json().unwrap(), json);

        let mut bold = text;
        bold.style.bold = Some(true);
        assert_eq!(
            bold.to_json().unwrap(),
            r#"{"text":"x","color":"white","bold":true,"italic":false}"#
        );
    }

    #[test]
    fn events_and_unknown_keys_survive() {
        let json = r#"{"text":"Boss","hoverEvent":{"action":"show_text","contents":"hi"},"clickEvent":{"action":"run_command","value":"/spawn"},"shadow_color":-16777216}"#;
        let text = TextComponent::from_json(json).unwrap();
        assert_eq!(text.plain_text(), "Boss");
        assert_eq!(text.other.len(), 3);
        assert_eq!(
            text.other["hoverEvent"],
            serde_json::json!({"action": "show_text", "contents": "hi"})
        );
        assert_eq!(text.to_json().unwrap(), json);

        let upper = text.map_literals(&|s: &str| s.to_uppercase());
        let written = upper.to_json().unwrap();
        let reread = TextComponent::from_json(&written).unwrap();
        assert_eq!(reread, upper);
        assert_eq!(reread.other, text.other);
        assert_eq!(reread.plain_text(), "BOSS");
    }

    #[test]
    fn every_content_kind_is_read() {
        let cases = [
            r#"{"translate":"item.unknown","fallback":"Unknown","with":[{"text":"a"}]}"#,
            r#"{"keybind":"key.jump"}"#,
            r#"{"score":{"name":"@s","objective":"kills"}}"#,
            r#"{"selector":"@e[type=sheep]","separator":{"text":" | ","color":"gray"}}"#,
            r#"{"nbt":"Items[0].id","block":"1 64 -3","interpret":false}"#,
            r#"{"nbt":"Health","entity":"@p"}"#,
            r#"{"nbt":"quest.title","storage":"minecraft:quests","interpret":true}"#,
        ];
        for json in cases {
            let text = TextComponent::from_json(json).unwrap_or_else(|e| panic!("{json}: {e}"));
            assert!(text.other.is_empty(), "{json} left {:?}", text.other);
            assert_eq!(text.to_json().unwrap(), json);
            assert_eq!(serde_json::to_string(&text).unwrap(), json);
        }
    }

    #[test]
    fn nbt_without_source_is_rejected() {
        assert!(TextComponent::from_json(r#"{"nbt":"Health"}"#).is_err());
    }

    #[test]
    fn map_literals_reaches_separators() {
        let text = TextComponent::from_json(r#"{"selector":"@a","separator":" and "}"#).unwrap();
        let upper = text.map_literals(&|s: &str| s.to_uppercase());
        assert_eq!(
            upper.content,
            TextContent::Selector {
                selector: "@a".into(),
                separator: Some(Box::new(TextComponent::text(" AND "))),
            }
        );
        assert_eq!(
            upper.to_json().unwrap(),
            r#"{"selector":"@a","separator":{"text":" AND "}}"#
        );
    }
}
