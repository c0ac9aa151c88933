use axum::{
    http::{StatusCode, Uri},
    response::Html,
};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Contacts</title>
    <meta charset="UTF-8">
  </head>
  <body>
    <h1>Contacts</h1>
    <p>Server time: <span id="server-time"></span></p>
    <form id="add-contact">
      <input name="firstName" placeholder="First name" required>
      <input name="lastName" placeholder="Last name" required>
      <input name="email" type="email" placeholder="Email" required>
      <button type="submit">Add</button>
    </form>
    <p id="status"></p>
    <table>
      <thead><tr><th>First</th><th>Last</th><th>Email</th><th></th></tr></thead>
      <tbody id="contacts"></tbody>
    </table>
    <script>
      const body = document.getElementById("contacts");

      function cell(row, text) {
        const td = document.createElement("td");
        td.textContent = text;
        row.appendChild(td);
      }

      const statusLine = document.getElementById("status");

      async function refresh() {
        let contacts;
        try {
          const res = await fetch("/api/contacts");
          contacts = await res.json();
        } catch (err) {
          statusLine.textContent = "Error: could not reach the server";
          return;
        }
        body.replaceChildren();
        for (const c of contacts) {
          const row = document.createElement("tr");
          cell(row, c.firstName);
          cell(row, c.lastName);
          cell(row, c.email);
          const del = document.createElement("button");
          del.textContent = "Delete";
          del.onclick = async () => {
            await fetch(`/api/contact/${c.id}`, { method: "DELETE" });
            refresh();
          };
          const td = document.createElement("td");
          td.appendChild(del);
          row.appendChild(td);
          body.appendChild(row);
        }
      }

      async function tick() {
        const res = await fetch("/api/server-time");
        document.getElementById("server-time").textContent = (await res.json()).time;
      }

      document.getElementById("add-contact").onsubmit = async (ev) => {
        ev.preventDefault();
        const res = await fetch("/api/add-contact", {
          method: "POST",
          body: new FormData(ev.target),
        });
        if (res.ok) {
          statusLine.textContent = "Contact added";
          ev.target.reset();
        } else {
          const err = await res.json().catch(() => ({ error: res.statusText }));
          statusLine.textContent = "Error: " + err.error;
        }
        refresh();
      };

      refresh();
      tick();
      setInterval(() => {
        tick();
        refresh();
      }, 2000);
    </script>
  </body>
</html>
"#;

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(crate) async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    let page = escape_html(uri.path().trim_start_matches('/'));
    (
        StatusCode::NOT_FOUND,
        Html(format!(
            "<!DOCTYPE html>\n<html>\n  <head>\n    <title>Page not found</title>\n    \
             <meta charset=\"UTF-8\">\n  </head>\n  <body>\n    <h1>Page Not Found</h1>\n    \
             <p>Could not find a page: {page}</p>\n  </body>\n</html>\n"
        )),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{INDEX_HTML, escape_html};

    #[test]
    fn index_reports_add_errors_and_polls_the_list() {
        assert!(INDEX_HTML.contains(r#"<p id="status"></p>"#));
        assert!(INDEX_HTML.contains(r#"statusLine.textContent = "Error: " + err.error;"#));
        assert!(INDEX_HTML.contains("body: new FormData(ev.target)"));
        let poll = INDEX_HTML.find("setInterval(").expect("poll loop");
        let tail = &INDEX_HTML[poll..];
        assert!(tail.contains("refresh();") && tail.contains("}, 2000);"));
    }

    #[test]
    fn escapes_markup_in_paths() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
    }
}
