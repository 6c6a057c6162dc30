// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use httpd_rs::cfg::http_config::{ConfigParser, routes_from_ast};

const CONFIG: &str = r#"
# a comment above the listen directive
listen 8080;

location /static StaticHandler {
    root "./public files"; # quoted, contains a space
}

location /api ApiHandler {
    mount /api;
    data_path ./data;
}
"#;

#[test]
fn a_config_with_comments_and_a_quoted_value_parses_end_to_end() {
    let ast = ConfigParser::parse(CONFIG.as_bytes()).expect("valid config");
    let parsed = routes_from_ast(&ast).expect("routes extract");

    assert_eq!(parsed.listen_port, 8080);
    assert_eq!(parsed.routes.len(), 2);

    let static_route = &parsed.routes[0];
    assert_eq!(static_route.prefix, "/static");
    assert_eq!(static_route.handler_name, "StaticHandler");
    assert_eq!(
        static_route.args,
        vec![("root".to_string(), "./public files".to_string())]
    );

    let api_route = &parsed.routes[1];
    assert_eq!(api_route.prefix, "/api");
    assert_eq!(
        api_route.args,
        vec![
            ("mount".to_string(), "/api".to_string()),
            ("data_path".to_string(), "./data".to_string()),
        ]
    );
}
