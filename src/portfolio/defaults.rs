//! Built-in site content.

use super::{Course, PersonalInfo, Portfolio, Project, TimelineItem};

const BIO: &str = "I'm a creative UI/UX Designer and Full Stack Web Developer based in Ethiopia. \
I'm very passionate and dedicated to my work. With a few years of experience as a Full Stack Web \
Developer, I have acquired the skills necessary to build great, appealing, and premium websites \
that meet the latest web standards. I am a detail-oriented Web Developer adept at interpreting \
blueprints, working with others, and meeting production deadlines. I am skilled at quickly \
learning new technologies and machinery. I am self-motivated with strong organizational and time \
management abilities. Most importantly, I'm constantly trying to learn new skills to improve \
myself and my work.";

fn project(title: &str, description: &str, technologies: &[&str]) -> Project {
    Project {
        title: title.into(),
        description: description.into(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
    }
}

fn course(title: &str, description: &str, level: &str) -> Course {
    Course {
        title: title.into(),
        description: description.into(),
        level: level.into(),
    }
}

fn timeline(period: &str, title: &str, institution: &str, description: &str) -> TimelineItem {
    TimelineItem {
        period: period.into(),
        title: title.into(),
        institution: institution.into(),
        description: description.into(),
    }
}

pub(super) fn builtin() -> Portfolio {
    Portfolio {
        personal: PersonalInfo {
            name: "Kassahun Mulatu".into(),
            role: "Full Stack Web Developer".into(),
            tagline: "Building digital experiences with modern technologies.".into(),
            email: "kmulatu21@gmail.com".into(),
            phone: "+251915508167".into(),
            address: "Bahir Dar, Ethiopia".into(),
            bio: BIO.into(),
            possessive: Some("his".into()),
        },
        other_roles: vec!["Educator".into(), "YouTuber".into(), "Banker".into()],
        projects: vec![
            project(
                "Amazon Clone",
                "A full-featured e-commerce replica of Amazon. Features include user \
                 authentication, product search & filtering, shopping cart functionality, and \
                 Stripe payment integration. Built with a focus on pixel-perfect UI and scalable \
                 backend architecture.",
                &["React", "Node.js", "Express", "MySQL", "Stripe"],
            ),
            project(
                "Netflix Clone",
                "A high-performance streaming platform clone. Includes movie trailers, genre \
                 categorization, and a dynamic 'My List' feature. Utilizes TMDB API for real-time \
                 data and features a responsive, cinematic user interface.",
                &["Next.js", "Typescript", "Tailwind CSS", "Firebase"],
            ),
            project(
                "Apple Website Clone",
                "A stunning, animation-heavy recreation of the Apple website. Showcases complex \
                 scroll animations, 3D product rendering effects, and a fully responsive layout \
                 that mimics the premium feel of the original site.",
                &["React", "Three.js", "GSAP", "Node.js"],
            ),
        ],
        courses: vec![
            course(
                "Full Stack Web Development Bootcamp",
                "A comprehensive guide to becoming a professional developer. Covers HTML, CSS, \
                 JavaScript, React, Node.js, and Databases.",
                "Beginner to Pro",
            ),
            course(
                "UI/UX Masterclass",
                "Learn the principles of design, wireframing, and prototyping to build \
                 user-centered products.",
                "Intermediate",
            ),
            course(
                "Advanced React & Redux",
                "Deep dive into React ecosystem, state management patterns, and performance \
                 optimization.",
                "Advanced",
            ),
        ],
        education: vec![
            timeline(
                "2016 - 2021",
                "BSc Degree in Electrical Engineering",
                "Bahir Dar University",
                "Graduated with honors. Focused on Control Systems, Embedded Systems, and \
                 Software Engineering principles.",
            ),
            timeline(
                "2020 - 2021",
                "Full Stack Web Development Certification",
                "Udemy / Coursera",
                "Completed intensive bootcamps focusing on modern web technologies including \
                 MERN stack and Cloud Computing.",
            ),
        ],
        experience: vec![
            timeline(
                "2022 - Present",
                "Freelance Full Stack Developer",
                "Remote",
                "Building custom web solutions for diverse clients. Architecting scalable \
                 applications and delivering high-quality code.",
            ),
            timeline(
                "2021 - 2022",
                "Web Developer & Educator",
                "Self-Employed",
                "Created educational content for aspiring developers and mentored students in \
                 web development technologies.",
            ),
        ],
        support_url: "http://ye-buna.com/kassahunmulatu".into(),
    }
}
