//! Page-side scripts.
//!
//! Each script is a single-argument function expression; the browser backend
//! invokes it with the JSON argument passed to `Page::evaluate`.

/// Measure an element. Returns `null` when nothing matches the selector.
pub const MEASURE: &str = r#"(selector) => {
  const element = document.querySelector(selector);
  if (!element) return null;
  const rect = element.getBoundingClientRect();
  return {
    rect: { x: rect.left, y: rect.top, width: rect.width, height: rect.height },
    scroll: { x: window.scrollX, y: window.scrollY },
    viewport: { width: window.innerWidth, height: window.innerHeight }
  };
}"#;

pub const SHOW_HIGHLIGHT: &str = r#"({ box, color, borderWidth, style }) => {
  const highlight = document.createElement('div');
  highlight.className = `demo-highlight ${style}`;
  highlight.style.cssText = `
    top: ${box.y}px;
    left: ${box.x}px;
    width: ${box.width}px;
    height: ${box.height}px;
    border: ${borderWidth}px solid ${color};
    color: ${color};
  `;
  highlight.setAttribute('data-demo-effect', 'highlight');
  document.body.appendChild(highlight);
}"#;

pub const APPLY_ZOOM: &str = r#"({ originX, originY, scale, offsetX, offsetY }) => {
  const body = document.body;
  body.style.transformOrigin = `${originX}px ${originY}px`;
  body.style.transform = `scale(${scale}) translate(${offsetX}px, ${offsetY}px)`;
  body.style.transition = 'transform 0.5s cubic-bezier(0.4, 0.0, 0.2, 1)';
  body.setAttribute('data-demo-zoomed', 'true');
}"#;

pub const SHOW_SPOTLIGHT: &str = r#"({ box, dimness, borderRadius }) => {
  const svgNS = 'http://www.w3.org/2000/svg';
  const doc = document.documentElement;
  const overlay = document.createElement('div');
  overlay.className = 'demo-spotlight-overlay';
  overlay.setAttribute('data-demo-effect', 'spotlight');
  overlay.style.width = `${doc.scrollWidth}px`;
  overlay.style.height = `${doc.scrollHeight}px`;

  const svg = document.createElementNS(svgNS, 'svg');
  svg.setAttribute('width', '100%');
  svg.setAttribute('height', '100%');
  svg.style.display = 'block';

  const mask = document.createElementNS(svgNS, 'mask');
  mask.setAttribute('id', 'demo-spotlight-mask');
  const visible = document.createElementNS(svgNS, 'rect');
  visible.setAttribute('width', '100%');
  visible.setAttribute('height', '100%');
  visible.setAttribute('fill', 'white');
  const cutout = document.createElementNS(svgNS, 'rect');
  cutout.setAttribute('x', String(box.x));
  cutout.setAttribute('y', String(box.y));
  cutout.setAttribute('width', String(box.width));
  cutout.setAttribute('height', String(box.height));
  cutout.setAttribute('rx', String(borderRadius));
  cutout.setAttribute('fill', 'black');
  mask.appendChild(visible);
  mask.appendChild(cutout);

  const defs = document.createElementNS(svgNS, 'defs');
  defs.appendChild(mask);
  svg.appendChild(defs);

  const dim = document.createElementNS(svgNS, 'rect');
  dim.setAttribute('width', '100%');
  dim.setAttribute('height', '100%');
  dim.setAttribute('fill', `rgba(0, 0, 0, ${dimness})`);
  dim.setAttribute('mask', 'url(#demo-spotlight-mask)');
  svg.appendChild(dim);

  overlay.appendChild(svg);
  document.body.appendChild(overlay);
}"#;

pub const SHOW_NARRATION: &str = r#"({ text, position, fontSize }) => {
  let overlay = document.querySelector('.demo-narration-overlay');
  if (!overlay) {
    overlay = document.createElement('div');
    overlay.setAttribute('data-demo-effect', 'narration');
    document.body.appendChild(overlay);
  }
  overlay.textContent = text;
  overlay.style.fontSize = `${fontSize}px`;
  overlay.className = `demo-narration-overlay ${position}`;
  setTimeout(() => overlay.classList.add('visible'), 50);
}"#;

pub const CLEAR_HIGHLIGHTS: &str = r#"() => {
  document.querySelectorAll('[data-demo-effect="highlight"]').forEach((el) => el.remove());
}"#;

pub const CLEAR_ZOOM: &str = r#"() => {
  const body = document.body;
  if (body.hasAttribute('data-demo-zoomed')) {
    body.style.transform = '';
    body.style.transformOrigin = '';
    body.style.transition = 'transform 0.5s cubic-bezier(0.4, 0.0, 0.2, 1)';
    body.removeAttribute('data-demo-zoomed');
  }
}"#;

pub const CLEAR_SPOTLIGHT: &str = r#"() => {
  document.querySelectorAll('[data-demo-effect="spotlight"]').forEach((el) => el.remove());
}"#;

pub const CLEAR_NARRATION: &str = r#"() => {
  const overlay = document.querySelector('.demo-narration-overlay');
  if (overlay) {
    overlay.classList.remove('visible');
    setTimeout(() => overlay.remove(), 400);
  }
}"#;

/// `scrollIntoView` on the first match. Returns whether an element matched.
pub const SCROLL_INTO_VIEW: &str = r#"({ selector, behavior, block }) => {
  const element = document.querySelector(selector);
  if (!element) return false;
  element.scrollIntoView({ behavior, block });
  return true;
}"#;
