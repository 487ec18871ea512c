//! Server-rendered HTML pages.
//!
//! Pages are assembled from small string fragments. Every value that came
//! from the database or the request goes through [`escape`].

use bookshelf_core::book_form::{BoundBookForm, AUTHOR_FIELD, BOOK_FIELD, MAX_NAME_LEN};
use bookshelf_core::notice::Notice;
use bookshelf_db::models::author::AuthorWithBooks;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         {body}\
         </body>\n\
         </html>\n",
        title = escape(title),
    )
}

/// GET /demo1: authors and their books, read-only.
pub fn author_list_page(authors: &[AuthorWithBooks]) -> String {
    let mut body = String::from("<h1>Authors</h1>\n<ul class=\"authors\">\n");
    for entry in authors {
        body.push_str(&format!("<li>{}\n<ul>\n", escape(&entry.author.name)));
        for book in &entry.books {
            body.push_str(&format!("<li>{}</li>\n", escape(&book.name)));
        }
        body.push_str("</ul>\n</li>\n");
    }
    body.push_str("</ul>\n");
    layout("Authors", &body)
}

/// GET|POST /demo2: the add-book form, notices, and the catalog with delete links.
pub fn add_book_page(
    authors: &[AuthorWithBooks],
    form: &BoundBookForm,
    notices: &[Notice],
) -> String {
    let mut body = String::from("<h1>Library</h1>\n");

    for notice in notices {
        body.push_str(&format!(
            "<p class=\"notice {}\">{}</p>\n",
            notice.level().css_class(),
            escape(notice.message()),
        ));
    }

    body.push_str("<form method=\"post\" action=\"/demo2\">\n");
    body.push_str(&text_field(
        form,
        AUTHOR_FIELD,
        "Author:",
        "Enter the author",
        &form.values.author_name,
    ));
    body.push_str(&text_field(
        form,
        BOOK_FIELD,
        "Book:",
        "Enter the book title",
        &form.values.book_name,
    ));
    body.push_str("<input type=\"submit\" value=\"Add\">\n</form>\n<hr>\n");

    body.push_str("<ul class=\"authors\">\n");
    for entry in authors {
        body.push_str(&format!(
            "<li>{} <a href=\"/delauth/{}\">delete</a>\n<ul>\n",
            escape(&entry.author.name),
            entry.author.id,
        ));
        for book in &entry.books {
            body.push_str(&format!(
                "<li>{} <a href=\"/delbook/{}\">delete</a></li>\n",
                escape(&book.name),
                book.id,
            ));
        }
        body.push_str("</ul>\n</li>\n");
    }
    body.push_str("</ul>\n");

    layout("Library", &body)
}

fn text_field(
    form: &BoundBookForm,
    name: &str,
    label: &str,
    placeholder: &str,
    value: &str,
) -> String {
    let mut html = format!(
        "<p>\n<label for=\"{name}\">{label}</label>\n\
         <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\" \
         placeholder=\"{placeholder}\" maxlength=\"{MAX_NAME_LEN}\" required>\n",
        label = escape(label),
        value = escape(value),
        placeholder = escape(placeholder),
    );
    if let Some(error) = form.error(name) {
        html.push_str(&format!(
            "<span class=\"field-error\">{}</span>\n",
            escape(error)
        ));
    }
    html.push_str("</p>\n");
    html
}
