//! Built-in page served when the configured index file cannot be read.

pub const FALLBACK_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Score Board Server</title>
</head>
<body>
    <h1>Score board server is running</h1>
    <p>Place an <code>index.html</code> next to the server to serve the score board page.</p>
    <p>WebSocket endpoint: <code>/ws</code> (upgrades on <code>/</code> are accepted too)</p>
    <p>Server status: <a href="/api/status">/api/status</a></p>
</body>
</html>
"#;
