//! 分析导出 XML 解析
//!
//! 文档结构：根元素下重复的 `<row>` 为 Visit，每个 Visit 内一个
//! `<actionDetails>`，其下重复的 `<row>` 为 Action。只查找直接子元素。

use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, Node, ParsingOptions};
use tracing::trace;

use super::model::{Action, Visit};
use crate::errors::{FlattenerError, Result};

const ROW_TAG: &str = "row";
const ACTION_CONTAINER_TAG: &str = "actionDetails";
const MAX_PROLOG_LEN: usize = 256;

/// 按字节解析
///
/// XML 声明中指定了 ASCII 兼容的单字节编码（如 `ISO-8859-1`）时按该编码解码，
/// 其余情况要求 UTF-8，忽略开头的 BOM。
pub fn parse_visits_bytes(input: &[u8]) -> Result<Vec<Visit>> {
    match declared_encoding(input) {
        Some(encoding) => {
            let (text, had_errors) = encoding.decode_without_bom_handling(input);
            if had_errors {
                return Err(FlattenerError::xml_parse(format!(
                    "Input is not valid {}",
                    encoding.name()
                )));
            }
            trace!("Decoded XML input as {}", encoding.name());
            parse_visits(&text)
        }
        None => parse_visits(std::str::from_utf8(input)?),
    }
}

/// 从 `<?xml ... encoding="..."?>` 中取出非 UTF-8 的 ASCII 兼容编码
fn declared_encoding(input: &[u8]) -> Option<&'static Encoding> {
    let prolog = input.strip_prefix(b"<?xml")?;
    let end = prolog.windows(2).take(MAX_PROLOG_LEN).position(|w| w == b"?>")?;
    let decl = &prolog[..end];

    let key = decl.windows(8).position(|w| w == b"encoding")?;
    let rest = decl[key + 8..].trim_ascii_start().strip_prefix(b"=")?.trim_ascii_start();
    let (&quote, rest) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let label = &rest[..rest.iter().position(|&b| b == quote)?];

    Encoding::for_label(label).filter(|enc| *enc != UTF_8 && enc.is_ascii_compatible())
}

/// 解析 XML 文本，按文档顺序返回所有 Visit
pub fn parse_visits(input: &str) -> Result<Vec<Visit>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    let document = Document::parse_with_options(input, options)?;

    let visits: Vec<Visit> = child_elements(document.root_element(), ROW_TAG)
        .map(parse_visit)
        .collect();

    trace!("Parsed {} visits from XML document", visits.len());
    Ok(visits)
}

fn parse_visit(node: Node<'_, '_>) -> Visit {
    // 缺少 actionDetails 视为零个动作
    let actions = first_child_element(node, ACTION_CONTAINER_TAG)
        .map(|container| child_elements(container, ROW_TAG).map(parse_action).collect())
        .unwrap_or_default();

    Visit {
        id_site: find_text(node, "idSite"),
        id_visit: find_text(node, "idVisit"),
        visit_ip: find_text(node, "visitIp"),
        visitor_id: find_text(node, "visitorId"),
        fingerprint: find_text(node, "fingerprint"),
        visit_server_hour: find_text(node, "visitServerHour"),
        referrer_type: find_text(node, "referrerTypeName"),
        visit_duration_pretty: find_text(node, "visitDurationPretty"),
        actions,
    }
}

fn parse_action(node: Node<'_, '_>) -> Action {
    Action {
        action_type: find_text(node, "type"),
        action_url: find_text(node, "url"),
        page_title: find_text(node, "pageTitle"),
        time_spent: find_text(node, "timeSpentPretty"),
        server_time_pretty: find_text(node, "serverTimePretty"),
    }
}

fn is_named<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace().is_none()
        && node.tag_name().name() == name
}

fn child_elements<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    parent.children().filter(move |n| is_named(n, name))
}

fn first_child_element<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> Option<Node<'a, 'input>> {
    parent.children().find(|n| is_named(n, name))
}

/// 第一个同名直接子元素的前导文本
///
/// 子元素缺失返回 `None`；存在但无文本返回 `Some("")`。
/// 前导文本指第一个子元素之前的所有文本节点（注释被跳过）。
fn find_text(parent: Node<'_, '_>, name: &'static str) -> Option<String> {
    first_child_element(parent, name).map(|element| {
        element
            .children()
            .take_while(|n| !n.is_element())
            .filter_map(|n| if n.is_text() { n.text() } else { None })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_root() {
        let visits = parse_visits("<result/>").unwrap();
        assert!(visits.is_empty());
    }

    #[test]
    fn test_missing_and_empty_fields() {
        let xml = "<result><row><idSite>1</idSite><visitIp/></row></result>";
        let visits = parse_visits(xml).unwrap();

        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].id_site.as_deref(), Some("1"));
        assert_eq!(visits[0].visit_ip.as_deref(), Some(""));
        assert_eq!(visits[0].visitor_id, None);
        assert!(visits[0].actions.is_empty());
    }

    #[test]
    fn test_referrer_read_from_type_name() {
        let xml = "<result><row><referrerType>x</referrerType>\
                   <referrerTypeName>direct</referrerTypeName></row></result>";
        let visits = parse_visits(xml).unwrap();
        assert_eq!(visits[0].referrer_type.as_deref(), Some("direct"));
    }

    #[test]
    fn test_leading_text_skips_comments_and_decodes_entities() {
        let xml = "<result><row><pageTitle>ignored</pageTitle><actionDetails><row>\
                   <pageTitle><!-- c -->A &amp; B<![CDATA[ <C>]]></pageTitle>\
                   </row></actionDetails></row></result>";
        let visits = parse_visits(xml).unwrap();
        assert_eq!(
            visits[0].actions[0].page_title.as_deref(),
            Some("A & B <C>")
        );
    }

    #[test]
    fn test_only_direct_children_match() {
        let xml = "<result><wrapper><row><idSite>9</idSite></row></wrapper>\
                   <row><nested><idSite>7</idSite></nested></row></result>";
        let visits = parse_visits(xml).unwrap();

        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].id_site, None);
    }

    #[test]
    fn test_namespaced_rows_are_ignored() {
        let xml = r#"<result xmlns:m="urn:m"><m:row><idSite>1</idSite></m:row></result>"#;
        let visits = parse_visits(xml).unwrap();
        assert!(visits.is_empty());
    }

    #[test]
    fn test_bom_is_ignored() {
        let visits = parse_visits_bytes("\u{feff}<result><row/></result>".as_bytes()).unwrap();
        assert_eq!(visits.len(), 1);
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = parse_visits("<result><row></result>").unwrap_err();
        assert!(matches!(err, FlattenerError::XmlParse(_)));
    }

    #[test]
    fn test_declared_latin1_is_decoded() {
        let mut xml = b"<?xml version='1.0' encoding=\"ISO-8859-1\"?><result><row>\
                        <actionDetails><row><pageTitle>Caf"
            .to_vec();
        xml.push(0xe9);
        xml.extend_from_slice(b"</pageTitle></row></actionDetails></row></result>");

        let visits = parse_visits_bytes(&xml).unwrap();
        assert_eq!(visits[0].actions[0].page_title.as_deref(), Some("Caf\u{e9}"));
    }

    #[test]
    fn test_declared_encoding_lookup() {
        assert!(declared_encoding(b"<?xml version=\"1.0\" encoding='latin1'?><a/>").is_some());
        assert!(declared_encoding(b"<?xml version=\"1.0\" encoding=\"utf-8\"?><a/>").is_none());
        assert!(declared_encoding(b"<?xml version=\"1.0\"?><a/>").is_none());
        assert!(declared_encoding(b"<a/>").is_none());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = parse_visits_bytes(&[b'<', b'a', 0xff, b'/', b'>']).unwrap_err();
        assert!(matches!(err, FlattenerError::XmlParse(_)));
    }
}
