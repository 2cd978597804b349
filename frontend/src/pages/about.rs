use yew::prelude::*;

use crate::snap::hook::use_hero_snap;

#[function_component(About)]
pub fn about() -> Html {
    use_hero_snap();

    html! {
        <div class="about-page">
            <section class="hero title-band">
                <h1>{"About the circuit"}</h1>
                <p>{"Seventy years of racing on a wartime airfield, and still getting faster."}</p>
            </section>

            <section class="about-section alternate">
                <div class="about-content">
                    <h2>{"From runways to racing line"}</h2>
                    <p>
                        {"The first laps were marked out with straw bales on the perimeter roads of an airfield. The layout has changed many times since, but the fast sweeping corners that drivers talk about have stayed."}
                    </p>
                </div>
            </section>

            <section class="about-section">
                <div class="about-content">
                    <h2>{"A circuit for everyone"}</h2>
                    <p>
                        {"Most days on track are not race days. Clubs, schools, manufacturers and first-time drivers share the tarmac, and the facilities are built to look after all of them."}
                    </p>
                </div>
            </section>

            <style>
                {r#"
                    .about-page {
                        background: #0b0b0d;
                        color: #f2f2f2;
                    }
                    .about-page .hero {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        text-align: center;
                        padding: 0 1.5rem;
                        background-image: url('/assets/about-hero.jpg');
                        background-repeat: no-repeat;
                        background-size: cover;
                    }
                    .about-section {
                        min-height: 60vh;
                        padding: 5rem 1.5rem;
                    }
                    .about-section.alternate {
                        background: #141418;
                    }
                    .about-content {
                        max-width: 760px;
                        margin: 0 auto;
                    }
                "#}
            </style>
        </div>
    }
}
