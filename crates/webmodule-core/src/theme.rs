//! Built-in stylesheet.
//!
//! Served when nothing else was configured, and used as the base framework
//! by [`crate::css::CssComposer::initialize_base_theme`]. Theme overlays
//! override the custom properties declared in `:root`.

pub const DEFAULT_CSS: &str = r#":root {
  --primary-color: #3d5af1;
  --secondary-color: #2944d2;
  --success-color: #4caf50;
  --info-color: #2196f3;
  --warning-color: #ff9800;
  --error-color: #f44336;
  --bg-color: #f4f6fb;
  --card-bg: #ffffff;
  --text-color: #333333;
  --text-muted: #666666;
  --border-color: #dee2e6;
  --shadow-color: rgba(0, 0, 0, 0.1);
  --font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
  --border-radius: 8px;
}

body {
  font-family: var(--font-family);
  margin: 0;
  padding: 20px;
  background: var(--bg-color);
  color: var(--text-color);
  line-height: 1.6;
}

.container {
  max-width: 800px;
  margin: 0 auto;
  padding: 30px;
  background: var(--card-bg);
  border: 1px solid var(--border-color);
  border-radius: 15px;
  box-shadow: 0 4px 16px var(--shadow-color);
}

h1, h2, h3 {
  color: var(--primary-color);
  margin-top: 0;
}

.nav-links {
  display: flex;
  flex-wrap: wrap;
  gap: 12px;
  margin-bottom: 24px;
}

.nav-links a {
  padding: 6px 14px;
  border-radius: var(--border-radius);
  color: var(--primary-color);
  text-decoration: none;
}

.nav-links a.active,
.nav-links a:hover {
  background: var(--primary-color);
  color: #ffffff;
}

.btn {
  display: inline-block;
  padding: 8px 16px;
  border: 1px solid var(--border-color);
  border-radius: var(--border-radius);
  background: var(--card-bg);
  color: var(--text-color);
  text-decoration: none;
  cursor: pointer;
}

.btn-primary {
  background: var(--primary-color);
  border-color: var(--primary-color);
  color: #ffffff;
}

.btn-secondary {
  background: var(--secondary-color);
  border-color: var(--secondary-color);
  color: #ffffff;
}

.button-group {
  display: flex;
  flex-wrap: wrap;
  gap: 10px;
  margin-top: 20px;
}

.success { color: var(--success-color); font-weight: bold; }
.info { color: var(--info-color); font-weight: bold; }
.warning { color: var(--warning-color); font-weight: bold; }
.error { color: var(--error-color); font-weight: bold; }

.status-message {
  margin: 20px 0;
  padding: 15px;
  border-left: 4px solid currentColor;
  border-radius: var(--border-radius);
  background: var(--bg-color);
}

.error-page {
  text-align: center;
}

.error-description {
  color: var(--text-muted);
  font-size: 1.1em;
}
"#;
