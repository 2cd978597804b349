use yew::prelude::*;
use yew_router::components::Link;

use crate::snap::hook::use_hero_snap;
use crate::Route;

const SERVICES: [(&str, &str); 4] = [
    ("Track days", "Private and open pit-lane sessions on the Grand Prix and National circuits, with instructors on hand."),
    ("Driving experiences", "Single-seater, GT and rally packages for first-timers and seasoned drivers alike."),
    ("Corporate events", "Hospitality suites, team challenges and paddock tours built around your group."),
    ("Vehicle testing", "Closed-circuit time, telemetry support and secure garages for manufacturers and teams."),
];

#[function_component(Home)]
pub fn home() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    use_hero_snap();

    html! {
        <div class="home-page">
            <section class="hero" data-parallax-hero="" data-hero-snap={r#"{"duration_ms": 900}"#}>
                <div class="hero-content">
                    <h1>{"Built for speed. Made for people."}</h1>
                    <p>{"Track time, driving experiences and events at the home of British motorsport."}</p>
                    <span class="hero-cue">{"Scroll"}</span>
                </div>
            </section>

            <section class="intro">
                <div class="intro-content">
                    <h2>{"Welcome to Silverstone"}</h2>
                    <p>
                        {"Whether it is your first lap or your five-hundredth, our team gets you onto the circuit safely and makes every session count."}
                    </p>
                    <Link<Route> to={Route::About} classes="intro-link">
                        {"About the circuit"}
                    </Link<Route>>
                </div>
            </section>

            <section class="services">
                <h2>{"What we offer"}</h2>
                <div class="service-grid">
                    {
                        SERVICES.iter().map(|(title, body)| html! {
                            <div class="service-card" key={title.to_string()}>
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <footer class="site-footer">
                <p>{"Silverstone Circuit, Towcester, Northamptonshire"}</p>
            </footer>

            <style>
                {r#"
                    .home-page {
                        background: #0b0b0d;
                        color: #f2f2f2;
                    }
                    .hero {
                        min-height: 100vh;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background-image: url('/assets/hero-grid.jpg');
                        background-repeat: no-repeat;
                        background-size: cover;
                        background-position: center 0px;
                        text-align: center;
                        padding: 0 1.5rem;
                    }
                    .hero-content h1 {
                        font-size: clamp(2.2rem, 6vw, 4.5rem);
                        margin-bottom: 1rem;
                    }
                    .hero-cue {
                        display: inline-block;
                        margin-top: 3rem;
                        letter-spacing: 0.2em;
                        text-transform: uppercase;
                        opacity: 0.7;
                    }
                    .intro {
                        min-height: 100vh;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: #141418;
                        padding: 4rem 1.5rem;
                    }
                    .intro-content {
                        max-width: 720px;
                        text-align: center;
                    }
                    .intro-link {
                        display: inline-block;
                        margin-top: 2rem;
                        padding: 0.75rem 1.5rem;
                        border: 1px solid rgba(255, 255, 255, 0.4);
                        border-radius: 4px;
                        color: inherit;
                        text-decoration: none;
                    }
                    .services {
                        padding: 5rem 1.5rem;
                        max-width: 1100px;
                        margin: 0 auto;
                    }
                    .service-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                        gap: 1.5rem;
                    }
                    .service-card {
                        background: #1b1b21;
                        border-radius: 8px;
                        padding: 1.5rem;
                    }
                    .site-footer {
                        padding: 2rem 1.5rem;
                        text-align: center;
                        color: #888;
                    }
                "#}
            </style>
        </div>
    }
}
