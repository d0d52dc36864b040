// ============================================================================
// ResxTool - ResX 资源文件模型
// ============================================================================
//
// 文件: src/models/resx.rs
// 职责: ResX 文档的内存表示、解析与序列化
// 边界:
//   - ✅ XML 节点树定义（元素、文本、CDATA、注释）
//   - ✅ ResX 文件解析（保留全部原始结构）
//   - ✅ ResX 文件序列化与缩进美化
//   - ✅ resheader / data 条目读写
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含语言表或文件命名规则
//   - ❌ 不应包含 CLI 相关逻辑
//
// ============================================================================

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// 根元素名
pub const ROOT_TAG: &str = "root";
/// 头部条目元素名
pub const RESHEADER_TAG: &str = "resheader";
/// 数据条目元素名
pub const DATA_TAG: &str = "data";
/// 值元素名
pub const VALUE_TAG: &str = "value";

pub const RESX_MIMETYPE: &str = "text/microsoft-resx";
pub const RESX_VERSION: &str = "2.0";
pub const RESX_READER: &str = "System.Resources.ResXResourceReader, System.Windows.Forms, \
     Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";
pub const RESX_WRITER: &str = "System.Resources.ResXResourceWriter, System.Windows.Forms, \
     Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const INDENT: &str = "  ";

/// ResX 读写错误
#[derive(Debug, Error)]
pub enum ResxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("resx document has no root element")]
    MissingRoot,

    #[error("unexpected root element <{0}>, expected <root>")]
    UnexpectedRoot(String),
}

fn syntax_error(position: u64, err: impl std::fmt::Display) -> ResxError {
    ResxError::Syntax {
        position,
        message: err.to_string(),
    }
}

// ============================================================================
// XML 节点树
// ============================================================================

/// XML 节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

/// XML 元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// 元素名（保留命名空间前缀，如 `xsd:schema`）
    pub name: String,
    /// 属性列表，按原始顺序
    pub attributes: Vec<(String, String)>,
    /// 子节点
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// 获取属性值
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// 子元素迭代器
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// 第一个指定名称的子元素
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|element| element.name == name)
    }

    /// 直接文本内容；没有任何文本节点时返回 None
    pub fn text(&self) -> Option<String> {
        let mut text: Option<String> = None;
        for node in &self.children {
            if let XmlNode::Text(part) | XmlNode::CData(part) = node {
                text.get_or_insert_with(String::new).push_str(part);
            }
        }
        text
    }

    /// 替换直接文本内容，保留子元素和注释
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children
            .retain(|node| !matches!(node, XmlNode::Text(_) | XmlNode::CData(_)));
        let text = text.into();
        if !text.is_empty() {
            self.children.insert(0, XmlNode::Text(text));
        }
    }

    fn has_element_children(&self) -> bool {
        self.elements().next().is_some()
    }

    /// 缩进美化：只重排纯空白文本，混合内容保持原样
    fn indent(&mut self, level: usize) {
        if !self.has_element_children() {
            return;
        }

        let whitespace_only = self.children.iter().all(|node| match node {
            XmlNode::Text(text) => text.trim().is_empty(),
            XmlNode::CData(_) => false,
            _ => true,
        });

        if whitespace_only {
            let inner = format!("\n{}", INDENT.repeat(level + 1));
            let children = std::mem::take(&mut self.children);
            for child in children
                .into_iter()
                .filter(|node| !matches!(node, XmlNode::Text(_)))
            {
                self.children.push(XmlNode::Text(inner.clone()));
                self.children.push(child);
            }
            self.children
                .push(XmlNode::Text(format!("\n{}", INDENT.repeat(level))));
        }

        for child in self.elements_mut() {
            child.indent(level + 1);
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }

        out.push('>');
        for node in &self.children {
            write_node(node, out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn write_node(node: &XmlNode, out: &mut String) {
    match node {
        XmlNode::Element(element) => element.write_to(out),
        XmlNode::Text(text) => out.push_str(&partial_escape(text.as_str())),
        XmlNode::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        XmlNode::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<XmlElement, ResxError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| syntax_error(position, e))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| syntax_error(position, e))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

// ============================================================================
// ResX 文档
// ============================================================================

/// 字符串条目 (key, value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub key: String,
    pub value: String,
}

/// ResX 文档
///
/// 解析时保留根元素下的全部节点（注释、schema、二进制条目、空白），
/// 因此克隆出的文档与源文件结构一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResxDocument {
    /// 根元素之前的注释
    prolog: Vec<XmlNode>,
    root: XmlElement,
}

impl Default for ResxDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ResxDocument {
    /// 创建带标准 resheader 的最小文档
    pub fn new() -> Self {
        let mut document = Self {
            prolog: Vec::new(),
            root: XmlElement::new(ROOT_TAG),
        };
        document.add_header("resmimetype", RESX_MIMETYPE);
        document.add_header("version", RESX_VERSION);
        document.add_header("reader", RESX_READER);
        document.add_header("writer", RESX_WRITER);
        document
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.root.children.push(XmlNode::Element(
            XmlElement::new(RESHEADER_TAG)
                .with_attr("name", name)
                .with_child(XmlElement::new(VALUE_TAG).with_text(value)),
        ));
    }

    /// 追加字符串条目
    pub fn add_string(&mut self, key: &str, value: &str) {
        self.root.children.push(XmlNode::Element(
            XmlElement::new(DATA_TAG)
                .with_attr("name", key)
                .with_attr("xml:space", "preserve")
                .with_child(XmlElement::new(VALUE_TAG).with_text(value)),
        ));
    }

    /// 读取 resheader 值
    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<String> {
        self.root
            .elements()
            .filter(|element| element.name == RESHEADER_TAG)
            .find(|element| element.attr("name") == Some(name))
            .and_then(|element| element.child(VALUE_TAG))
            .and_then(XmlElement::text)
    }

    /// 全部 data 条目（包括二进制条目）
    pub fn data_entries(&self) -> impl Iterator<Item = &XmlElement> {
        self.root
            .elements()
            .filter(|element| element.name == DATA_TAG)
    }

    fn data_entry_mut(&mut self, key: &str) -> Option<&mut XmlElement> {
        self.root
            .elements_mut()
            .filter(|element| element.name == DATA_TAG)
            .find(|element| element.attr("name") == Some(key))
    }

    /// 可翻译的字符串条目，按文档顺序
    ///
    /// 带 `type` / `mimetype` 属性的条目、没有 name 或没有文本值的条目被排除。
    /// 重复的 name 只保留第一个，和 `value` / `set_value` 的查找一致。
    pub fn string_entries(&self) -> Vec<StringEntry> {
        let mut seen = HashSet::new();
        self.data_entries()
            .filter(|element| is_string_entry(element))
            .filter_map(|element| {
                let key = element.attr("name")?.to_string();
                let value = element.child(VALUE_TAG)?.text()?;
                Some(StringEntry { key, value })
            })
            .filter(|entry| seen.insert(entry.key.clone()))
            .collect()
    }

    /// 字符串条目的 key 列表
    #[cfg(test)]
    pub fn keys(&self) -> Vec<String> {
        self.string_entries()
            .into_iter()
            .map(|entry| entry.key)
            .collect()
    }

    /// 指定 key 的值；条目不存在或 value 无文本时返回 None
    pub fn value(&self, key: &str) -> Option<String> {
        self.data_entries()
            .find(|element| element.attr("name") == Some(key))
            .and_then(|element| element.child(VALUE_TAG))
            .and_then(XmlElement::text)
    }

    /// 替换指定 key 的值，返回是否找到条目
    pub fn set_value(&mut self, key: &str, value: &str) -> bool {
        match self
            .data_entry_mut(key)
            .and_then(|element| element.child_mut(VALUE_TAG))
        {
            Some(value_element) => {
                value_element.set_text(value);
                true
            }
            None => false,
        }
    }

    /// 两空格缩进美化
    pub fn indent(&mut self) {
        self.root.indent(0);
    }

    /// 从字符串解析
    pub fn parse(xml: &str) -> Result<Self, ResxError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut prolog = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event()
                .map_err(|e| syntax_error(position, e))?;

            let finished = match event {
                Event::Start(start) => {
                    stack.push(element_from_start(&start, position)?);
                    None
                }
                Event::Empty(start) => Some(element_from_start(&start, position)?),
                Event::End(_) => Some(
                    stack
                        .pop()
                        .ok_or_else(|| syntax_error(position, "unmatched end tag"))?,
                ),
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = text.unescape().map_err(|e| syntax_error(position, e))?;
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                    None
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                        parent.children.push(XmlNode::CData(text));
                    }
                    None
                }
                Event::Comment(comment) => {
                    let text = String::from_utf8_lossy(&comment.into_inner()).into_owned();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Comment(text)),
                        None if root.is_none() => prolog.push(XmlNode::Comment(text)),
                        None => {}
                    }
                    None
                }
                Event::Eof => break,
                // 声明、处理指令、DOCTYPE 在写出时统一重建
                _ => None,
            };

            if let Some(element) = finished {
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None if root.is_none() => root = Some(element),
                    None => return Err(syntax_error(position, "multiple root elements")),
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(syntax_error(
                reader.buffer_position() as u64,
                format!("unclosed element <{}>", open.name),
            ));
        }

        let root = root.ok_or(ResxError::MissingRoot)?;
        if root.name != ROOT_TAG {
            return Err(ResxError::UnexpectedRoot(root.name));
        }

        Ok(Self { prolog, root })
    }

    /// 从文件加载
    pub fn load(path: &Path) -> Result<Self, ResxError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// 序列化为带 XML 声明的字符串
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push('\n');
        for node in &self.prolog {
            write_node(node, &mut out);
            out.push('\n');
        }
        self.root.write_to(&mut out);
        out.push('\n');
        out
    }

    /// 写入文件（覆盖）
    pub fn save(&self, path: &Path) -> Result<(), ResxError> {
        fs::write(path, self.to_xml_string())?;
        tracing::debug!(path = %path.display(), "resx written");
        Ok(())
    }
}

fn is_string_entry(element: &XmlElement) -> bool {
    element.name == DATA_TAG && !element.has_attr("type") && !element.has_attr("mimetype")
}
