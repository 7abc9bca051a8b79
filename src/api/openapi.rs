use serde_json::{json, Value};

/// OpenAPI description of the service so plugin hosts can discover
/// `GetWikiText` and its `title` parameter.
pub fn document() -> Value {
    json!({
        "openapi": "3.0.1",
        "info": {
            "title": "Wikipedia article text",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/GetWikiText": {
                "get": operation(),
                "post": operation()
            }
        }
    })
}

fn operation() -> Value {
    json!({
        "operationId": "GetWikiText",
        "tags": ["ExecuteFunction"],
        "description": "Get the text of a wiki page from a given query so it can be summarized by SummarizeWikiArticle",
        "parameters": [{
            "name": "title",
            "in": "query",
            "description": "The title of a wikipedia article",
            "required": true,
            "schema": {"type": "string"}
        }],
        "responses": {
            "200": {
                "description": "The text of the wiki article that can be passed to SummarizeWikiArticle",
                "content": {"text/plain": {"schema": {"type": "string"}}}
            },
            "400": {
                "description": "No article with content exists for the title",
                "content": {"text/plain": {"schema": {"type": "string"}}}
            }
        }
    })
}
