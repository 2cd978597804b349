use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod config;
mod snap {
    pub mod backdrop;
    pub mod controller;
    pub mod cooldown;
    pub mod dom;
    pub mod error;
    pub mod geometry;
    pub mod hook;
    pub mod intent;
    pub mod player;
    pub mod zone;
}
mod pages {
    pub mod about;
    pub mod home;
}

use pages::{about::About, home::Home};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/about")]
    About,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::About => {
            info!("Rendering About page");
            html! { <About /> }
        },
        Route::NotFound => {
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    html! {
        <header class="site-header">
            <nav class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"Silverstone"}
                </Link<Route>>
                <div class="nav-right">
                    <Link<Route> to={Route::About} classes="nav-link">
                        {"About"}
                    </Link<Route>>
                </div>
            </nav>
        </header>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
