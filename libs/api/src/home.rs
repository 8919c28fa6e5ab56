use axum::response::Html;

const HOME: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>My Social Media Analytics</title>
</head>
<body>
  <h1>&#128105;&#127996;&#8205;&#128187; My Social Media Analytics</h1>
  <h4>Built for simplicity. Backed by clarity.</h4>
  <p>
    Tracking followers growth, post likes, reach, reshares, impressions and
    more across every social media account, all in one place.
  </p>
  <ul>
    <li><strong>Post Analytics</strong>: engagement per post, summary metrics
      and engagement per platform at <a href="/dashboard">/dashboard</a>.</li>
    <li><strong>Add a post</strong>: <code>POST /posts</code>, starting from
      the blank form at <a href="/posts/form">/posts/form</a>.</li>
    <li><strong>API docs</strong>: <a href="/swagger-ui">Swagger UI</a>,
      <a href="/redoc">Redoc</a>, <a href="/rapidoc">RapiDoc</a>.</li>
  </ul>
  <p>Platforms: X, Threads, LinkedIn, Facebook, Instagram, TikTok and Snapchat.</p>
</body>
</html>
"#;

pub async fn get_home() -> Html<&'static str> {
    Html(HOME)
}
