use maud::{html, Markup};

use super::{human_date, layout, TemplateData};
use crate::common::Validator;
use crate::snippets::models::{Snippet, SnippetCreateForm};
use crate::users::models::{UserLoginForm, UserSignupForm};

fn field_error(validator: &Validator, field: &str) -> Markup {
    html! {
        @if let Some(message) = validator.field_error(field) {
            label.error { (message) }
        }
    }
}

pub fn home_page(data: &TemplateData, snippets: &[Snippet]) -> Markup {
    let content = html! {
        h2 { "Latest Snippets" }
        @if snippets.is_empty() {
            p { "There's nothing to see here... yet!" }
        } @else {
            table {
                tr {
                    th { "Title" }
                    th { "Created" }
                    th { "ID" }
                }
                @for snippet in snippets {
                    tr {
                        td { a href={ "/snippet/view/" (snippet.id) } { (snippet.title) } }
                        td { (human_date(snippet.created)) }
                        td { "#" (snippet.id) }
                    }
                }
            }
        }
    };
    layout(data, "Home", content)
}

pub fn view_page(data: &TemplateData, snippet: &Snippet) -> Markup {
    let content = html! {
        div.snippet {
            div.metadata {
                strong { (snippet.title) }
                span { "#" (snippet.id) }
            }
            pre { code { (snippet.content) } }
            div.metadata {
                time { "Created: " (human_date(snippet.created)) }
                time { "Expires: " (human_date(snippet.expires)) }
            }
        }
    };
    layout(data, &format!("Snippet #{}", snippet.id), content)
}

pub fn create_page(data: &TemplateData, form: &SnippetCreateForm) -> Markup {
    let content = html! {
        form action="/snippet/create" method="POST" {
            div {
                label { "Title:" }
                (field_error(&form.validator, "title"))
                input type="text" name="title" value=(form.title);
            }
            div {
                label { "Content:" }
                (field_error(&form.validator, "content"))
                textarea name="content" { (form.content) }
            }
            div {
                label { "Delete in:" }
                (field_error(&form.validator, "expires"))
                input type="radio" name="expires" value="365" checked[form.expires == 365]; " One Year "
                input type="radio" name="expires" value="7" checked[form.expires == 7]; " One Week "
                input type="radio" name="expires" value="1" checked[form.expires == 1]; " One Day"
            }
            div {
                input type="submit" value="Publish snippet";
            }
        }
    };
    layout(data, "Create a New Snippet", content)
}

pub fn signup_page(data: &TemplateData, form: &UserSignupForm) -> Markup {
    let content = html! {
        form action="/user/signup" method="POST" novalidate {
            div {
                label { "Name:" }
                (field_error(&form.validator, "name"))
                input type="text" name="name" value=(form.name);
            }
            div {
                label { "Email:" }
                (field_error(&form.validator, "email"))
                input type="email" name="email" value=(form.email);
            }
            div {
                label { "Password:" }
                (field_error(&form.validator, "password"))
                input type="password" name="password";
            }
            div {
                input type="submit" value="Signup";
            }
        }
    };
    layout(data, "Signup", content)
}

pub fn login_page(data: &TemplateData, form: &UserLoginForm) -> Markup {
    let content = html! {
        form action="/user/login" method="POST" novalidate {
            @for message in &form.validator.non_field_errors {
                div.error { (message) }
            }
            div {
                label { "Email:" }
                (field_error(&form.validator, "email"))
                input type="email" name="email" value=(form.email);
            }
            div {
                label { "Password:" }
                (field_error(&form.validator, "password"))
                input type="password" name="password";
            }
            div {
                input type="submit" value="Login";
            }
        }
    };
    layout(data, "Login", content)
}
