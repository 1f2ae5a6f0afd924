use crate::calendar::adjacent_months;
use crate::models::{CalendarCell, DayKind, MonthCalendar, MonthlySummary};
use std::fmt::Write;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub fn render_index(calendar: &MonthCalendar, summary: &MonthlySummary) -> String {
    let ((prev_year, prev_month), (next_year, next_month)) =
        adjacent_months(calendar.year, calendar.month);
    let best_day = summary
        .best_day
        .as_ref()
        .map(|record| format!("{:.2} <small>{}</small>", record.tip_total, record.date))
        .unwrap_or_else(|| "0.00".to_string());

    INDEX_HTML
        .replace("{{TITLE}}", &month_title(calendar.year, calendar.month))
        .replace("{{PREV}}", &format!("/?year={prev_year}&month={prev_month}"))
        .replace("{{NEXT}}", &format!("/?year={next_year}&month={next_month}"))
        .replace("{{YEAR}}", &calendar.year.to_string())
        .replace("{{MONTH}}", &calendar.month.to_string())
        .replace("{{TOTAL}}", &format!("{:.2}", summary.total_tips))
        .replace("{{AVERAGE}}", &format!("{:.2}", summary.average_tips))
        .replace(
            "{{DAYS}}",
            &format!("{}/{}", summary.working_days, summary.target_days),
        )
        .replace("{{BEST}}", &best_day)
        .replace("{{WEEKLY}}", &format!("{:.2}", summary.weekly_average))
        .replace("{{GRID}}", &render_grid(calendar))
}

fn month_title(year: i32, month: u32) -> String {
    let name = (month as usize)
        .checked_sub(1)
        .and_then(|index| MONTHS.get(index))
        .copied()
        .unwrap_or("?");
    format!("{name} {year}")
}

fn render_grid(calendar: &MonthCalendar) -> String {
    let mut html = String::new();
    for name in WEEKDAYS {
        let _ = write!(html, r#"<div class="weekday">{name}</div>"#);
    }
    for cell in calendar.weeks.iter().flatten() {
        render_cell(&mut html, cell);
    }
    html
}

fn render_cell(html: &mut String, cell: &CalendarCell) {
    if !cell.in_month {
        html.push_str(r#"<div class="day outside"></div>"#);
        return;
    }

    let kind = match cell.kind {
        DayKind::Workday => "workday",
        DayKind::Saturday => "saturday",
        DayKind::HolidayOrSunday => "holiday",
    };
    let (filled, detail, tips, deliveries) = match &cell.record {
        Some(record) => (
            " filled",
            format!(
                r#"<span class="tips">{:.2}</span><span class="meta">{} deliveries{}</span>"#,
                record.tip_total,
                record.delivery_count,
                weather_note(record.temperature, record.precipitation),
            ),
            format!("{:.2}", record.tip_total),
            record.delivery_count.to_string(),
        ),
        None => ("", String::new(), String::new(), String::new()),
    };

    let _ = write!(
        html,
        r#"<button type="button" class="day {kind}{filled}" data-date="{date}" data-tips="{tips}" data-deliveries="{deliveries}"><span class="num">{day}</span>{detail}</button>"#,
        date = cell.date,
        day = chrono::Datelike::day(&cell.date),
    );
}

fn weather_note(temperature: Option<f64>, precipitation: Option<f64>) -> String {
    match (temperature, precipitation) {
        (None, None) => String::new(),
        (t, p) => {
            let t = t.map(|v| format!("{v:.1}°C")).unwrap_or_else(|| "–".into());
            let p = p.map(|v| format!("{v:.1} mm")).unwrap_or_else(|| "–".into());
            format!(" · {t} · {p}")
        }
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Tip Calendar · {{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f0f2f5;
      --ink: #2b2a28;
      --accent: #dc3545;
      --accent-dark: #b21f2d;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg-1);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      border-bottom: 2px solid var(--accent);
      padding-bottom: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 3.5vw, 2.4rem);
      margin: 0;
    }

    header nav a {
      color: var(--accent);
      font-weight: 600;
      text-decoration: none;
      padding: 8px 14px;
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
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .weekday {
      background: var(--accent);
      color: white;
      text-align: center;
      font-weight: 600;
      font-size: 0.8rem;
      padding: 10px 0;
      border: 1px solid var(--accent-dark);
    }

    .day {
      min-height: 100px;
      background: white;
      border: 1px solid #d1d1d1;
      border-radius: 4px;
      padding: 8px;
      display: flex;
      flex-direction: column;
      align-items: flex-start;
      gap: 4px;
      font: inherit;
      text-align: left;
      cursor: pointer;
    }

    .day:hover {
      border-color: var(--accent);
      background: #fff5f5;
    }

    .day.outside {
      background: transparent;
      border: none;
      cursor: default;
    }

    .day .num {
      font-weight: 600;
      font-size: 1.1rem;
    }

    .day.saturday .num {
      color: var(--accent-2);
    }

    .day.holiday .num {
      color: var(--accent);
    }

    .day.filled {
      border-color: var(--accent-2);
    }

    .day .tips {
      font-weight: 600;
      color: #2d7a4b;
    }

    .day .meta {
      font-size: 0.75rem;
      color: #7a746d;
    }

    .footer {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .footer-card {
      background: var(--accent);
      color: white;
      border-radius: 10px;
      padding: 20px;
      text-align: center;
    }

    .footer-card .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
      margin-top: 10px;
    }

    .footer-card a {
      color: white;
    }

    dialog {
      border: none;
      border-radius: 20px;
      padding: 24px;
      box-shadow: var(--shadow);
      width: min(360px, 90vw);
    }

    dialog form {
      display: grid;
      gap: 12px;
    }

    dialog input {
      font: inherit;
      padding: 10px;
      border-radius: 8px;
      border: 1px solid #d1d1d1;
    }

    dialog button {
      font: inherit;
      font-weight: 600;
      border: none;
      border-radius: 999px;
      padding: 12px;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    dialog button.cancel {
      background: #e8e8e8;
      color: var(--ink);
    }

    #chart {
      width: 100%;
      height: 200px;
      display: block;
      background: white;
      border-radius: 18px;
    }

    .chart-bar {
      fill: var(--accent);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 10px;
    }

    @media (max-width: 700px) {
      .app {
        padding: 24px 14px;
      }
      .day {
        min-height: 64px;
      }
      .day .meta {
        display: none;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <nav><a href="{{PREV}}">&larr;</a></nav>
      <h1>{{TITLE}}</h1>
      <nav><a href="{{NEXT}}">&rarr;</a></nav>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">This month</span>
        <span class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Average per day</span>
        <span class="value">{{AVERAGE}}</span>
      </div>
      <div class="stat">
        <span class="label">Days worked</span>
        <span class="value">{{DAYS}}</span>
      </div>
    </section>

    <section class="grid">{{GRID}}</section>

    <svg id="chart" viewBox="0 0 600 200" preserveAspectRatio="none" role="img" aria-label="Tips per day"></svg>

    <section class="footer">
      <div class="footer-card">Best day<span class="value">{{BEST}}</span></div>
      <div class="footer-card">Average per week<span class="value">{{WEEKLY}}</span></div>
      <div class="footer-card">Export<span class="value"><a href="/export.csv">tips.csv</a></span></div>
    </section>
  </main>

  <dialog id="edit">
    <form method="post" action="/day">
      <strong id="edit-date"></strong>
      <input type="hidden" name="date" id="date-input" />
      <label>Tips
        <input type="number" name="tip_total" id="tips-input" min="0" step="0.01" required />
      </label>
      <label>Deliveries
        <input type="number" name="delivery_count" id="deliveries-input" min="1" step="1" required />
      </label>
      <button type="submit">Save</button>
      <button type="button" class="cancel" id="cancel">Cancel</button>
    </form>
  </dialog>

  <script>
    const dialog = document.getElementById("edit");

    document.querySelectorAll(".day[data-date]").forEach((cell) => {
      cell.addEventListener("click", () => {
        document.getElementById("edit-date").textContent = cell.dataset.date;
        document.getElementById("date-input").value = cell.dataset.date;
        document.getElementById("tips-input").value = cell.dataset.tips || "";
        document.getElementById("deliveries-input").value = cell.dataset.deliveries || "1";
        dialog.showModal();
      });
    });

    document.getElementById("cancel").addEventListener("click", () => dialog.close());

    async function drawChart() {
      const svg = document.getElementById("chart");
      const response = await fetch("/api/stats?year={{YEAR}}&month={{MONTH}}");
      if (!response.ok) {
        return;
      }
      const stats = await response.json();
      const points = stats.daily;
      if (points.length === 0) {
        return;
      }
      const max = Math.max(...points.map((p) => p.tip_total), 1);
      const width = 600 / 31;
      const ns = "http://www.w3.org/2000/svg";
      points.forEach((point) => {
        const day = Number(point.date.slice(8, 10));
        const height = (point.tip_total / max) * 170;
        const bar = document.createElementNS(ns, "rect");
        bar.setAttribute("class", "chart-bar");
        bar.setAttribute("x", (day - 1) * width + 2);
        bar.setAttribute("y", 180 - height);
        bar.setAttribute("width", width - 4);
        bar.setAttribute("height", height);
        svg.appendChild(bar);
        const label = document.createElementNS(ns, "text");
        label.setAttribute("class", "chart-label");
        label.setAttribute("x", (day - 1) * width + 2);
        label.setAttribute("y", 195);
        label.textContent = day;
        svg.appendChild(label);
      });
    }

    drawChart();
  </script>
</body>
</html>
"#;
