use crate::models::DailyAggregate;

/// Renders the dashboard page with the daily aggregates embedded as a JSON
/// bootstrap; the page's own script draws the summary, table and charts from
/// it and re-fetches `/api/daily` after each record action.
pub fn render_index(days: &[DailyAggregate]) -> String {
    let bootstrap = serde_json::to_string(days).unwrap_or_else(|_| "[]".to_string());
    INDEX_HTML.replace("{{BOOTSTRAP}}", &bootstrap)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>YouTube Daily Stats</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --views: #1f77b4;
      --likes: #ff7f0e;
      --comments: #2ca02c;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .delta {
      display: block;
      font-size: 0.95rem;
      font-weight: 600;
      color: #8b857d;
    }

    .stat .delta.up {
      color: #2d7a4b;
    }

    .stat .delta.down {
      color: #c63b2b;
    }

    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      align-items: center;
    }

    button,
    .btn-link {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 24px;
      font-size: 1rem;
      font-weight: 600;
      font-family: inherit;
      cursor: pointer;
      text-decoration: none;
      transition: transform 150ms ease, box-shadow 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 10px;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-record {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .btn-link {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .chart-section {
      display: grid;
      gap: 10px;
    }

    .chart-section h2,
    .table-section h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .chart-card svg {
      width: 100%;
      height: 300px;
      display: block;
    }

    .chart-card svg text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .table-section {
      display: grid;
      gap: 10px;
    }

    .table-card {
      background: white;
      border-radius: 20px;
      padding: 8px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      overflow-x: auto;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.95rem;
    }

    th,
    td {
      text-align: right;
      padding: 10px 12px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
      white-space: nowrap;
    }

    th:first-child,
    td:first-child {
      text-align: left;
    }

    tr:last-child td {
      border-bottom: none;
    }

    th {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: #8b857d;
    }

    td.delta {
      color: #8b857d;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .placeholder {
      background: white;
      border-radius: 20px;
      border: 1px dashed rgba(47, 72, 88, 0.25);
      padding: 40px;
      text-align: center;
      color: #6b645d;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>YouTube Daily Stats</h1>
      <p class="subtitle">Views, likes and comments for the tracked video, one bar per day.</p>
    </header>

    <section class="actions">
      <form id="record-form" method="post" action="/record">
        <button class="btn-record" type="submit">Record current counters</button>
      </form>
      <a class="btn-link" href="/export.csv" download>Export CSV</a>
    </section>

    <div class="status" id="status"></div>

    <div id="empty" class="placeholder" hidden>
      No data recorded yet. Press the button above to store the first sample.
    </div>

    <div id="dashboard" hidden>
      <section class="panel" style="margin-bottom: 28px;">
        <div class="stat">
          <span class="label">Day</span>
          <span class="value" id="summary-day">&ndash;</span>
        </div>
        <div class="stat">
          <span class="label">Views</span>
          <span class="value" id="summary-views">0</span>
          <span class="delta" id="summary-views-delta"></span>
        </div>
        <div class="stat">
          <span class="label">Likes</span>
          <span class="value" id="summary-likes">0</span>
          <span class="delta" id="summary-likes-delta"></span>
        </div>
        <div class="stat">
          <span class="label">Comments</span>
          <span class="value" id="summary-comments">0</span>
          <span class="delta" id="summary-comments-delta"></span>
        </div>
      </section>

      <section class="table-section" style="margin-bottom: 28px;">
        <h2>Daily data</h2>
        <div class="table-card">
          <table>
            <thead>
              <tr>
                <th>Day</th>
                <th>Views</th>
                <th>&Delta; Views</th>
                <th>Likes</th>
                <th>&Delta; Likes</th>
                <th>Comments</th>
                <th>&Delta; Comments</th>
              </tr>
            </thead>
            <tbody id="table-body"></tbody>
          </table>
        </div>
      </section>

      <section class="chart-section" style="margin-bottom: 28px;">
        <h2>Views per day</h2>
        <div class="chart-card"><svg id="chart-views" viewBox="0 0 640 300" role="img" aria-label="Views per day"></svg></div>
      </section>

      <section class="chart-section" style="margin-bottom: 28px;">
        <h2>Likes per day</h2>
        <div class="chart-card"><svg id="chart-likes" viewBox="0 0 640 300" role="img" aria-label="Likes per day"></svg></div>
      </section>

      <section class="chart-section">
        <h2>Comments per day</h2>
        <div class="chart-card"><svg id="chart-comments" viewBox="0 0 640 300" role="img" aria-label="Comments per day"></svg></div>
      </section>
    </div>

    <p class="hint">Each day keeps the highest counter seen that day (server time). Deltas compare against the previous recorded day.</p>
  </main>

  <script id="bootstrap" type="application/json">{{BOOTSTRAP}}</script>
  <script>
    const statusEl = document.getElementById('status');
    const emptyEl = document.getElementById('empty');
    const dashboardEl = document.getElementById('dashboard');
    const tableBody = document.getElementById('table-body');

    const METRICS = [
      { key: 'views', label: 'Views', color: 'var(--views)', chart: 'chart-views' },
      { key: 'likes', label: 'Likes', color: 'var(--likes)', chart: 'chart-likes' },
      { key: 'comments', label: 'Comments', color: 'var(--comments)', chart: 'chart-comments' }
    ];

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatDelta = (delta) => (delta >= 0 ? `+${delta}` : `${delta}`);

    const renderSummary = (days) => {
      const latest = days[days.length - 1];
      document.getElementById('summary-day').textContent = latest.day;
      METRICS.forEach(({ key, label }) => {
        document.getElementById(`summary-${key}`).textContent = latest[key];
        const deltaEl = document.getElementById(`summary-${key}-delta`);
        const delta = latest[`${key}_delta`];
        deltaEl.textContent = `${formatDelta(delta)} vs previous day`;
        deltaEl.className = 'delta ' + (delta > 0 ? 'up' : delta < 0 ? 'down' : '');
      });
    };

    const renderTable = (days) => {
      tableBody.innerHTML = '';
      days.forEach((day) => {
        const row = document.createElement('tr');
        row.innerHTML = `
          <td>${day.day}</td>
          <td>${day.views}</td>
          <td class="delta">${formatDelta(day.views_delta)}</td>
          <td>${day.likes}</td>
          <td class="delta">${formatDelta(day.likes_delta)}</td>
          <td>${day.comments}</td>
          <td class="delta">${formatDelta(day.comments_delta)}</td>
        `;
        tableBody.appendChild(row);
      });
    };

    // Contiguous fixed-width bars: the x axis is categorical, one slot per
    // recorded day, no inner padding.
    const renderBarChart = (svgId, days, key, label, color) => {
      const svg = document.getElementById(svgId);
      const width = 640;
      const height = 300;
      const paddingX = 52;
      const paddingY = 40;
      const top = 16;

      const plotWidth = width - paddingX * 2;
      const plotHeight = height - top - paddingY;
      const barWidth = plotWidth / days.length;
      const max = Math.max(1, ...days.map((day) => day[key]));
      const y = (value) => top + plotHeight - (value / max) * plotHeight;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const bars = days
        .map((day, index) => {
          const x = paddingX + index * barWidth;
          const barTop = y(day[key]);
          const tooltip = `${day.day}: ${day[key]} ${label.toLowerCase()} (&Delta; ${formatDelta(day[`${key}_delta`])})`;
          return `<rect x="${x.toFixed(2)}" y="${barTop.toFixed(2)}" width="${barWidth.toFixed(2)}" height="${(top + plotHeight - barTop).toFixed(2)}" fill="${color}"><title>${tooltip}</title></rect>`;
        })
        .join('');

      const labelEvery = Math.max(1, Math.ceil(days.length / 10));
      const xLabels = days
        .map((day, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          const x = paddingX + index * barWidth + barWidth / 2;
          return `<text class="chart-label" x="${x.toFixed(2)}" y="${height - paddingY + 30}" text-anchor="end" transform="rotate(-45 ${x.toFixed(2)} ${height - paddingY + 30})">${day.day}</text>`;
        })
        .join('');

      svg.innerHTML = `${grid}${bars}${xLabels}`;
    };

    const render = (days) => {
      const hasData = days.length > 0;
      emptyEl.hidden = hasData;
      dashboardEl.hidden = !hasData;
      if (!hasData) {
        return;
      }
      renderSummary(days);
      renderTable(days);
      METRICS.forEach(({ key, label, color, chart }) => renderBarChart(chart, days, key, label, color));
    };

    const loadDaily = async () => {
      const res = await fetch('/api/daily');
      if (!res.ok) {
        throw new Error('Unable to load daily data');
      }
      render(await res.json());
    };

    const recordForm = document.getElementById('record-form');
    recordForm.addEventListener('submit', (event) => {
      event.preventDefault();
      setStatus('Recording...', 'info');
      fetch('/api/record', { method: 'POST' })
        .then(async (res) => {
          if (!res.ok) {
            throw new Error((await res.text()) || 'Request failed');
          }
          const sample = await res.json();
          setStatus(`Recorded ${sample.ts}`, 'ok');
          return loadDaily();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    render(JSON.parse(document.getElementById('bootstrap').textContent));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_is_injected() {
        let days = vec![DailyAggregate {
            day: "2024-01-02".to_string(),
            views: 130,
            likes: 7,
            comments: 2,
            views_delta: 30,
            likes_delta: 2,
            comments_delta: 0,
        }];

        let html = render_index(&days);
        assert!(html.contains(r#""day":"2024-01-02""#));
        assert!(html.contains(r#""views_delta":30"#));
        assert!(!html.contains("{{BOOTSTRAP}}"));
    }

    #[test]
    fn empty_history_renders_empty_bootstrap() {
        let html = render_index(&[]);
        assert!(html.contains(r#"type="application/json">[]</script>"#));
    }
}
