use quorum_client::api::Credentials;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct LoginProps {
    pub on_sign_in: Callback<Credentials>,
    pub on_sign_up: Callback<Credentials>,
    pub on_cancel: Callback<()>,
}

pub struct Login {
    username: String,
    email: String,
    password: String,
}

pub enum LoginMsg {
    UsernameChanged(String),
    EmailChanged(String),
    PasswordChanged(String),
    SignInClicked,
    SignUpClicked,
}

impl Component for Login {
    type Message = LoginMsg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LoginMsg::UsernameChanged(u) => self.username = u,
            LoginMsg::EmailChanged(e) => self.email = e,
            LoginMsg::PasswordChanged(p) => self.password = p,
            LoginMsg::SignInClicked => {
                ctx.props().on_sign_in.emit(self.credentials());
                return false;
            }
            LoginMsg::SignUpClicked => {
                ctx.props().on_sign_up.emit(self.credentials());
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        macro_rules! callback_for {
            ($msg:ident) => {
                ctx.link().callback(|e: web_sys::Event| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    LoginMsg::$msg(input.value())
                })
            };
        }
        html! {<>
            <div class="text-center my-4">
                <h1>{ "Sign in" }</h1>
            </div>
            <form class="login-form">
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="username">{ "Username" }</label>
                    <input
                        type="text"
                        class="form-control form-control-lg"
                        id="username"
                        placeholder="user"
                        value={self.username.clone()}
                        onchange={callback_for!(UsernameChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="email">{ "Email" }</label>
                    <input
                        type="email"
                        class="form-control form-control-lg"
                        id="email"
                        placeholder="user@example.org"
                        value={self.email.clone()}
                        onchange={callback_for!(EmailChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="password">{ "Password" }</label>
                    <input
                        type="password"
                        class="form-control form-control-lg"
                        id="password"
                        placeholder="pass"
                        value={self.password.clone()}
                        onchange={callback_for!(PasswordChanged)}
                    />
                </div>
                <button
                    type="submit"
                    class="btn btn-primary me-2"
                    onclick={ctx.link().callback(|_| LoginMsg::SignInClicked)}
                >
                    { "Sign in" }
                </button>
                <button
                    type="button"
                    class="btn btn-outline-primary me-2"
                    onclick={ctx.link().callback(|_| LoginMsg::SignUpClicked)}
                >
                    { "Create account" }
                </button>
                <button
                    type="button"
                    class="btn btn-link"
                    onclick={ctx.props().on_cancel.reform(|_| ())}
                >
                    { "Keep browsing" }
                </button>
            </form>
        </>}
    }
}

impl Login {
    fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}
