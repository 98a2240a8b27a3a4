//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Segments whose next segment is a path parameter, and that parameter's template name.
const PARAMETERISED: [(&str, &str); 3] = [
    ("products", "{product}"),
    ("items", "{product}"),
    ("orders", "{order}"),
];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    /// The request path with identifiers replaced by their route parameter.
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

/// Maps a concrete path back onto the router's template so product slugs and ids do not
/// explode label cardinality.
fn route_template(path: &str) -> String {
    let mut template = String::new();
    let mut parameter: Option<&str> = None;

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        template.push('/');

        match parameter.take() {
            Some(name) => template.push_str(name),
            None if Uuid::parse_str(segment).is_ok() => template.push_str("{uuid}"),
            None => {
                template.push_str(segment);

                parameter = PARAMETERISED
                    .iter()
                    .find(|(prefix, _)| *prefix == segment)
                    .map(|(_, name)| *name);
            }
        }
    }

    if template.is_empty() {
        template.push('/');
    }

    template
}

#[cfg(test)]
mod tests {
    use super::request_span_name;

    #[test]
    fn cart_item_ids_become_the_product_parameter() {
        let names = request_span_name(
            "POST",
            "/cart/items/0190f1f4-8c3e-7a7e-9d4c-2b1a6f0e5d3c/increment",
        );

        assert_eq!(names.route, "/cart/items/{product}/increment");
        assert_eq!(names.span_name, "POST /cart/items/{product}/increment");
    }

    #[test]
    fn product_slugs_and_ids_share_one_route() {
        let by_slug = request_span_name("GET", "/products/granny-smith");
        let by_uuid = request_span_name("GET", "/products/0190f1f4-8c3e-7a7e-9d4c-2b1a6f0e5d3c");
        let comments = request_span_name("POST", "/products/granny-smith/comments");

        assert_eq!(by_slug.route, "/products/{product}");
        assert_eq!(by_uuid.route, "/products/{product}");
        assert_eq!(comments.route, "/products/{product}/comments");
    }

    #[test]
    fn order_actions_keep_their_verb() {
        let names = request_span_name(
            "POST",
            "/orders/0190f1f4-8c3e-7a7e-9d4c-2b1a6f0e5d3c/cancel",
        );

        assert_eq!(names.route, "/orders/{order}/cancel");
    }

    #[test]
    fn collections_and_root_are_unchanged() {
        assert_eq!(request_span_name("GET", "/products").route, "/products");
        assert_eq!(request_span_name("GET", "/cart/").route, "/cart");
        assert_eq!(request_span_name("GET", "/").route, "/");
    }
}
